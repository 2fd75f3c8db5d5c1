use crate::avl_tree::node::Node;
use std::cmp::Ordering;

pub type Tree = Option<Box<Node>>;

pub fn height(tree: &Tree) -> usize {
    match tree {
        None => 0,
        Some(ref node) => node.height,
    }
}

fn balance_factor(tree: &Tree) -> i32 {
    match tree {
        None => 0,
        Some(ref node) => node.balance(),
    }
}

fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}

// The inserted key decides between the single and the double rotation: it can only be on the
// outside of the heavy child (single) or on the inside (double).
fn balance_after_insert(tree: &mut Tree, key: i32) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();

    if node.balance() > 1 {
        let child_key = node.left.as_ref().map(|child| child.key);
        match child_key.map(|child_key| key.cmp(&child_key)) {
            Some(Ordering::Less) => node = rotate_right(node),
            Some(Ordering::Greater) => {
                node.left = node.left.take().map(rotate_left);
                node = rotate_right(node);
            },
            _ => {},
        }
    } else if node.balance() < -1 {
        let child_key = node.right.as_ref().map(|child| child.key);
        match child_key.map(|child_key| key.cmp(&child_key)) {
            Some(Ordering::Greater) => node = rotate_left(node),
            Some(Ordering::Less) => {
                node.right = node.right.take().map(rotate_right);
                node = rotate_left(node);
            },
            _ => {},
        }
    }

    *tree = Some(node);
}

fn balance_after_remove(tree: &mut Tree) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();

    if node.balance() > 1 {
        if balance_factor(&node.left) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        node = rotate_right(node);
    } else if node.balance() < -1 {
        if balance_factor(&node.right) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        node = rotate_left(node);
    }

    *tree = Some(node);
}

fn leftmost_key(node: &Node) -> i32 {
    let mut curr = node;
    while let Some(ref left_node) = curr.left {
        curr = left_node;
    }
    curr.key
}

pub fn insert(tree: &mut Tree, key: i32) -> bool {
    let inserted = match tree {
        Some(ref mut node) => match key.cmp(&node.key) {
            Ordering::Less => insert(&mut node.left, key),
            Ordering::Greater => insert(&mut node.right, key),
            Ordering::Equal => return false,
        },
        None => {
            *tree = Some(Box::new(Node::new(key)));
            return true;
        },
    };

    if inserted {
        balance_after_insert(tree, key);
    }
    inserted
}

pub fn remove(tree: &mut Tree, key: i32) -> bool {
    let removed = match tree.take() {
        Some(mut node) => match key.cmp(&node.key) {
            Ordering::Less => {
                let ret = remove(&mut node.left, key);
                *tree = Some(node);
                ret
            },
            Ordering::Greater => {
                let ret = remove(&mut node.right, key);
                *tree = Some(node);
                ret
            },
            Ordering::Equal => {
                match (node.left.take(), node.right.take()) {
                    (None, right) => *tree = right,
                    (left, None) => *tree = left,
                    (Some(left), Some(right)) => {
                        let successor = leftmost_key(&right);
                        node.key = successor;
                        node.left = Some(left);
                        node.right = Some(right);
                        remove(&mut node.right, successor);
                        *tree = Some(node);
                    },
                }
                true
            },
        },
        None => return false,
    };

    if removed {
        balance_after_remove(tree);
    }
    removed
}

pub fn contains(tree: &Tree, key: i32) -> bool {
    let mut curr = tree;
    while let Some(ref node) = curr {
        match key.cmp(&node.key) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => curr = &node.right,
            Ordering::Equal => return true,
        }
    }
    false
}

pub fn min(tree: &Tree) -> Option<i32> {
    tree.as_ref().map(|node| leftmost_key(node))
}

pub fn max(tree: &Tree) -> Option<i32> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        curr.key
    })
}
