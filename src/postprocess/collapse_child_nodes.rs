//! `CollapseChildNodes`: flattens purely structural nodes out of the tree.
//!
//! spec.md names this pass in the pipeline order and the options bit-mask
//! but does not detail its algorithm. This crate's chosen behaviour
//! (recorded in `DESIGN.md`): a node is collapsible when it carries no
//! mesh reference and its local transform is the identity, i.e. it exists
//! only to group its children. Collapsible nodes are removed and their
//! children are spliced into the parent's child list in their place,
//! bottom-up, so only nodes that either move geometry or reference a
//! model survive.

use glam::Mat4;

use crate::scene::{Node, Scene};

fn is_collapsible(node: &Node) -> bool {
    node.model_index.is_none() && node.local_transform == Mat4::IDENTITY
}

pub fn needs_processing(scene: &Scene) -> bool {
    let mut found = false;
    scene.walk(|node, _world| {
        if is_collapsible(node) {
            found = true;
        }
    });
    found
}

pub fn execute(scene: &mut Scene) {
    scene.root_nodes = collapse_list(std::mem::take(&mut scene.root_nodes));
}

fn collapse_list(children: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(children.len());
    for mut child in children {
        child.children = collapse_list(std::mem::take(&mut child.children));
        if is_collapsible(&child) {
            out.extend(child.children);
        } else {
            out.push(child);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Node {
        let mut node = Node::empty();
        node.name = Some(name.to_string());
        node
    }

    #[test]
    fn removes_an_identity_grouping_node_with_no_model() {
        let mut grouping = Node::empty();
        grouping.children.push(named("child"));
        let mut scene = Scene::empty();
        scene.root_nodes.push(grouping);

        assert!(needs_processing(&scene));
        execute(&mut scene);

        assert_eq!(scene.root_nodes.len(), 1);
        assert_eq!(scene.root_nodes[0].name.as_deref(), Some("child"));
    }

    #[test]
    fn keeps_a_node_that_carries_a_model() {
        let mut with_model = Node::empty();
        with_model.model_index = Some(0);
        let mut scene = Scene::empty();
        scene.root_nodes.push(with_model);

        assert!(!needs_processing(&scene));
        execute(&mut scene);
        assert_eq!(scene.root_nodes.len(), 1);
    }

    #[test]
    fn keeps_a_node_with_a_non_identity_transform() {
        let mut transformed = Node::empty();
        transformed.local_transform = Mat4::from_translation(glam::Vec3::new(1.0, 0.0, 0.0));
        let mut scene = Scene::empty();
        scene.root_nodes.push(transformed);

        assert!(!needs_processing(&scene));
    }

    #[test]
    fn collapses_multiple_levels_in_one_pass() {
        let leaf = named("leaf");
        let mut middle = Node::empty();
        middle.children.push(leaf);
        let mut top = Node::empty();
        top.children.push(middle);

        let mut scene = Scene::empty();
        scene.root_nodes.push(top);
        execute(&mut scene);

        assert_eq!(scene.root_nodes.len(), 1);
        assert_eq!(scene.root_nodes[0].name.as_deref(), Some("leaf"));
    }
}
