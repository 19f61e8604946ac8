//! Convenient Macros for creating process models
///
/// Creates a [`ProcessModel`](crate::ProcessModel).
///
/// Nodes are identified by their name and created on first mention.
/// Each `(sources; targets)` tuple adds one hyper-transition.
///
/// # Examples
///
/// ```rust
/// use bpmn_synthesis::{process_model, ProcessModel};
/// let model: ProcessModel = process_model!(
///     start: ["a"], final: ["d"];
///     ("a"; "b", "c"), ("b", "c"; "d")
/// );
/// assert_eq!(model.nodes.len(), 4);
/// assert_eq!(model.transitions.len(), 2);
/// ```
#[macro_export]
macro_rules! process_model {
    ( start: [$($s:expr),* $(,)?], final: [$($f:expr),* $(,)?] $(; $( ($($x:expr),+ ; $($y:expr),+) ),* $(,)? )? ) => {{
        #[allow(unused_imports)]
        use std::collections::{HashMap, HashSet};
        #[allow(unused_imports)]
        use $crate::core::process_models::hyper_model::{NodeID, ProcessModel};

        let mut result = ProcessModel::new();
        let start_names: HashSet<String> = HashSet::from_iter([$($s.to_string()),*]);
        let final_names: HashSet<String> = HashSet::from_iter([$($f.to_string()),*]);
        #[allow(unused_mut)]
        let mut transitions: Vec<(Vec<String>, Vec<String>)> = Vec::new();
        $($(
            transitions.push((vec![$($x.to_string()),+], vec![$($y.to_string()),+]));
        )*)?

        // Nodes in order of first mention
        let mut node_names: Vec<String> = Vec::new();
        for name in [$($s.to_string(),)* $($f.to_string(),)*]
            .into_iter()
            .chain(transitions.iter().flat_map(|(xs, ys)| xs.iter().chain(ys.iter()).cloned()))
        {
            if !node_names.contains(&name) {
                node_names.push(name);
            }
        }

        let mut node_id_dict: HashMap<String, NodeID> = HashMap::new();
        for name in node_names {
            let id = result.add_node(
                name.clone(),
                start_names.contains(&name),
                final_names.contains(&name),
                None,
            );
            node_id_dict.insert(name, id);
        }
        for (xs, ys) in transitions {
            result.add_transition(
                xs.iter().map(|x| node_id_dict[x]),
                ys.iter().map(|y| node_id_dict[y]),
                None,
            );
        }

        result
    }}
}
