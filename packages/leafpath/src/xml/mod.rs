//! XML utilities for navigating `roxmltree` DOM trees.

mod utils;

pub use utils::{
    element_children, find_child, get_attribute, get_tag_name, get_text, has_element_children,
    local_name, tag_matches_ignore_case,
};
