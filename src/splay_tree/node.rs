use crate::arena::Handle;

/// A node of a splay tree. Children and parent are handles into the arena that owns every node
/// of the tree; the parent handle is only followed while rotating and never owns anything.
pub struct Node {
    pub key: i32,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
    pub parent: Option<Handle>,
}

impl Node {
    pub fn new(key: i32, parent: Option<Handle>) -> Self {
        Node {
            key,
            left: None,
            right: None,
            parent,
        }
    }
}
