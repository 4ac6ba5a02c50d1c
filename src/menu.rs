//! Dropdown menu construction for team navigation.

use crate::page::Page;
use crate::team::{TeamNode, TeamTree};

/// Render menu items for `nodes`, depth-first, preserving input order.
///
/// Each node yields one `<li>` holding an `<a href="<name>.html">` with the
/// name as its text, verbatim; names are authored data and pass through
/// untouched. Leaves are plain `dropdown-item`s; nodes with children become
/// `dropdown-submenu`s wrapping a nested `dropdown-menu` list.
pub fn menu_items(nodes: &[TeamNode]) -> String {
    let mut out = String::new();
    build_items(nodes, &mut out);
    out
}

fn build_items(nodes: &[TeamNode], out: &mut String) {
    for node in nodes {
        if node.is_leaf() {
            out.push_str(&format!(
                "<li class=\"dropdown-item\"><a href=\"{name}.html\">{name}</a></li>\n",
                name = node.name,
            ));
        } else {
            out.push_str(&format!(
                "<li class=\"dropdown-submenu\"><a href=\"{name}.html\" class=\"dropdown-item\">{name}</a>\n<ul class=\"dropdown-menu\">\n",
                name = node.name,
            ));
            build_items(&node.children, out);
            out.push_str("</ul>\n</li>\n");
        }
    }
}

/// Populate the container `container_id` on `page` with the tree's members.
///
/// Pages without that container are left untouched; menu sections are
/// optional per page. The tree's root label is not rendered.
pub fn create_team(page: &mut Page, tree: &TeamTree, container_id: &str) {
    let Some(container) = page.container_mut(container_id) else {
        return;
    };
    container.push_str(&menu_items(&tree.members));
}
