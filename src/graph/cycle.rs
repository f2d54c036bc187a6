//! Cycle detection over module dependencies.

use indexmap::IndexMap;

use crate::module::Module;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum VisitState {
    Visiting,
    Visited,
}

/// First cycle found walking modules in declaration order, canonicalised so
/// the smallest module name leads. The leading name is repeated at the end.
///
/// Dependencies on unknown modules are skipped; they are reported separately.
pub(super) fn find_cycle(modules: &IndexMap<String, Module>) -> Option<Vec<String>> {
    let mut detector = CycleDetector {
        modules,
        stack: Vec::new(),
        states: IndexMap::new(),
    };
    modules.keys().find_map(|name| detector.visit(name))
}

struct CycleDetector<'a> {
    modules: &'a IndexMap<String, Module>,
    stack: Vec<&'a str>,
    states: IndexMap<&'a str, VisitState>,
}

impl<'a> CycleDetector<'a> {
    fn visit(&mut self, node: &'a str) -> Option<Vec<String>> {
        match self.states.get(node) {
            Some(VisitState::Visited) => return None,
            Some(VisitState::Visiting) => {
                let idx = self.stack.iter().position(|n| *n == node).unwrap_or_else(|| {
                    debug_assert!(false, "visiting node must be on the stack");
                    0
                });
                let mut cycle: Vec<String> =
                    self.stack.iter().skip(idx).map(|n| (*n).to_owned()).collect();
                cycle.push(node.to_owned());
                return Some(canonicalize_cycle(cycle));
            }
            None => {
                self.states.insert(node, VisitState::Visiting);
            }
        }

        self.stack.push(node);
        if let Some(module) = self.modules.get(node) {
            for dep in module.dependencies() {
                let Some((known, _)) = self.modules.get_key_value(dep.as_str()) else {
                    continue;
                };
                if let Some(cycle) = self.visit(known) {
                    return Some(cycle);
                }
            }
        }
        self.stack.pop();
        self.states.insert(node, VisitState::Visited);
        None
    }
}

fn canonicalize_cycle(mut cycle: Vec<String>) -> Vec<String> {
    if cycle.len() < 2 {
        return cycle;
    }
    let len = cycle.len() - 1;
    let start = cycle
        .iter()
        .take(len)
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map_or(0, |(idx, _)| idx);
    let (prefix, suffix) = cycle.split_at_mut(len);
    prefix.rotate_left(start);
    if let (Some(first), Some(slot)) = (prefix.first().cloned(), suffix.first_mut()) {
        *slot = first;
    }
    cycle
}
