//! Drives the tree through its paces: build from random input, show the four
//! traversals, unbalance it with large inserts, rebalance, and draw the
//! resulting structure.

use anyhow::Result;

use balanced_bst::gen::random_keys;
use balanced_bst::tree::Tree;

fn main() -> Result<()> {
    let keys = random_keys(10, 0, 100)?;
    let mut tree = Tree::build(keys);

    println!("Is balanced: {}", tree.is_balanced());

    println!("Level order:");
    tree.level_order(|key| println!("{}", key));
    println!("Pre order:");
    tree.pre_order(|key| println!("{}", key));
    println!("Post order:");
    tree.post_order(|key| println!("{}", key));
    println!("In order:");
    tree.in_order(|key| println!("{}", key));

    tree.insert(123);
    tree.insert(456);
    println!("Is balanced after inserting: {}", tree.is_balanced());

    tree.rebalance();
    println!("Is balanced: {}", tree.is_balanced());

    print!("{}", tree);

    Ok(())
}
