//! Recognises the call shapes that name an Inertia page with a string literal.

use crate::config::CallPatterns;
use crate::types::{CallNode, PageReference};

/// Argument index of the page name for renderer, helper and instance calls.
const PAGE_ARG: usize = 0;

/// Argument index of the page name for route registration (index 0 is the URL).
const ROUTE_PAGE_ARG: usize = 1;

/// Extract the page reference from a call, if it is one of the recognised shapes
/// and the page name is a string literal at the expected position.
///
/// Anything dynamic (a variable, a concatenation, a constant) yields `None`.
/// The rule prefers missing a literal case over flagging a dynamic one.
pub fn match_page_reference(call: &CallNode, patterns: &CallPatterns) -> Option<PageReference> {
    let position = page_argument_position(call, patterns)?;
    let raw_name = call.args().get(position)?.as_literal()?;

    return Some(PageReference {
        arg_position: position,
        node: call.node().clone(),
        raw_name: raw_name.to_string(),
    });
}

/// Which argument carries the page name for this call, if it is a page call at all.
fn page_argument_position(call: &CallNode, patterns: &CallPatterns) -> Option<usize> {
    return match call {
        CallNode::StaticCall { class, method, .. } => {
            let class = strip_leading_separator(class);
            if *method == patterns.render_method && contains(&patterns.renderer_classes, class) {
                Some(PAGE_ARG)
            } else if *method == patterns.route_method && contains(&patterns.router_classes, class) {
                Some(ROUTE_PAGE_ARG)
            } else {
                None
            }
        },
        CallNode::FunctionCall { name, .. } => {
            contains(&patterns.helper_functions, strip_leading_separator(name)).then_some(PAGE_ARG)
        },
        CallNode::MethodCall { method, .. } => {
            contains(&patterns.instance_methods, method).then_some(PAGE_ARG)
        },
    };
}

/// `\Inertia\Inertia` and `Inertia\Inertia` name the same class.
fn strip_leading_separator(name: &str) -> &str {
    return name.strip_prefix('\\').unwrap_or(name);
}

/// Exact membership test against configured identifiers.
fn contains(names: &[String], name: &str) -> bool {
    return names.iter().any(|candidate| return strip_leading_separator(candidate) == name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Argument, NodeId};

    fn lit(value: &str) -> Argument {
        Argument::StringLiteral(value.to_string())
    }

    fn static_call(class: &str, method: &str, args: Vec<Argument>) -> CallNode {
        CallNode::StaticCall {
            args,
            class: class.to_string(),
            method: method.to_string(),
            node: NodeId::detached(),
        }
    }

    fn name_of(call: &CallNode) -> Option<(String, usize)> {
        match_page_reference(call, &CallPatterns::default()).map(|r| (r.raw_name, r.arg_position))
    }

    #[test]
    fn renderer_by_simple_and_qualified_name() {
        for class in ["Inertia", "Inertia\\Inertia", "\\Inertia\\Inertia"] {
            let call = static_call(class, "render", vec![lit("Auth/Login")]);
            assert_eq!(name_of(&call), Some(("Auth/Login".to_string(), 0)), "{class}");
        }
    }

    #[test]
    fn route_uses_second_argument() {
        let call = static_call("Route", "inertia", vec![lit("/login"), lit("Auth.Login")]);
        assert_eq!(name_of(&call), Some(("Auth.Login".to_string(), 1)));

        let call = static_call("\\Illuminate\\Support\\Facades\\Route", "inertia", vec![lit("/"), lit("Home")]);
        assert_eq!(name_of(&call), Some(("Home".to_string(), 1)));
    }

    #[test]
    fn route_with_only_a_url_is_not_a_match() {
        let call = static_call("Route", "inertia", vec![lit("/login")]);
        assert_eq!(name_of(&call), None);
    }

    #[test]
    fn other_classes_and_methods_are_ignored() {
        assert_eq!(name_of(&static_call("View", "render", vec![lit("Home")])), None);
        assert_eq!(name_of(&static_call("Inertia", "share", vec![lit("Home")])), None);
        assert_eq!(name_of(&static_call("Route", "get", vec![lit("/"), lit("Home")])), None);
        assert_eq!(name_of(&static_call("inertia", "render", vec![lit("Home")])), None);
    }

    #[test]
    fn helper_function_and_instance_method() {
        let helper = CallNode::FunctionCall {
            args: vec![lit("Settings/Index")],
            name: "\\inertia".to_string(),
            node: NodeId::detached(),
        };
        assert_eq!(name_of(&helper), Some(("Settings/Index".to_string(), 0)));

        let method = CallNode::MethodCall {
            args: vec![lit("Profile/Edit")],
            method: "inertia".to_string(),
            node: NodeId::detached(),
        };
        assert_eq!(name_of(&method), Some(("Profile/Edit".to_string(), 0)));
    }

    #[test]
    fn dynamic_or_missing_names_do_not_match() {
        for args in [
            vec![],
            vec![Argument::Other],
            vec![Argument::Spread],
            vec![Argument::Named { name: "component".to_string() }],
        ] {
            assert_eq!(name_of(&static_call("Inertia", "render", args)), None);
        }
    }

    #[test]
    fn custom_patterns_replace_defaults() {
        let patterns = CallPatterns {
            helper_functions: vec!["page".to_string()],
            ..CallPatterns::default()
        };
        let page = CallNode::FunctionCall {
            args: vec![lit("Home")],
            name: "page".to_string(),
            node: NodeId::detached(),
        };
        let inertia = CallNode::FunctionCall {
            args: vec![lit("Home")],
            name: "inertia".to_string(),
            node: NodeId::detached(),
        };
        assert!(match_page_reference(&page, &patterns).is_some());
        assert!(match_page_reference(&inertia, &patterns).is_none());
    }
}
