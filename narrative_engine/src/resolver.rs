//! Route resolution - picking the next scene from an option's route list.

use story_graph::Route;

use crate::tags::TagStore;

/// Where a matched route leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Transition to the named scene.
    Scene(String),

    /// Deliberate non-transition; the scene repeats with its state intact.
    Stay,
}

/// Resolve an ordered route list against the current tag pools.
///
/// Routes are tried strictly in author order; the first whose `ifGlobal` and
/// `ifScene` conditions both hold decides the outcome, and later routes are
/// never consulted. `None` means nothing matched, which the caller must
/// treat as an authoring gap rather than inventing a transition.
pub fn resolve(routes: &[Route], tags: &TagStore) -> Option<Destination> {
    routes
        .iter()
        .find(|route| route_matches(route, tags))
        .map(|route| match &route.to {
            Some(id) => Destination::Scene(id.clone()),
            None => Destination::Stay,
        })
}

fn route_matches(route: &Route, tags: &TagStore) -> bool {
    let global_ok = route
        .if_global
        .as_ref()
        .map_or(true, |condition| condition.is_met(tags.global()));
    let scene_ok = route
        .if_scene
        .as_ref()
        .map_or(true, |condition| condition.is_met(tags.scene()));

    global_ok && scene_ok
}
