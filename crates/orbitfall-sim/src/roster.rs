//! The named gravitating bodies and the ordered pairs that connect them.

use hecs::Entity;

use orbitfall_core::config::SimConfig;

/// Two roster entities processed together.
///
/// For gravity, `first` is influenced and `second` is the influencer.
/// For collisions the order only fixes evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    pub first: Entity,
    pub second: Entity,
}

impl Pair {
    pub fn involves(&self, entity: Entity) -> bool {
        self.first == entity || self.second == entity
    }
}

/// Roster bodies in declaration order plus their resolved pairs.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    bodies: Vec<(String, Entity)>,
    gravity_pairs: Vec<Pair>,
    collision_pairs: Vec<Pair>,
}

impl Roster {
    /// Resolve the configured pair names against spawned entities.
    /// Names that do not resolve are dropped; a validated config has none.
    pub fn new(bodies: Vec<(String, Entity)>, config: &SimConfig) -> Self {
        let mut roster = Self {
            bodies,
            gravity_pairs: Vec::new(),
            collision_pairs: Vec::new(),
        };
        roster.gravity_pairs = roster.resolve(&config.gravity_pairs);
        roster.collision_pairs = roster.resolve(&config.collision_pairs);
        roster
    }

    fn resolve(&self, names: &[(String, String)]) -> Vec<Pair> {
        names
            .iter()
            .filter_map(|(a, b)| {
                Some(Pair {
                    first: self.entity(a)?,
                    second: self.entity(b)?,
                })
            })
            .collect()
    }

    pub fn bodies(&self) -> impl Iterator<Item = (&str, Entity)> {
        self.bodies.iter().map(|(name, e)| (name.as_str(), *e))
    }

    pub fn entity(&self, name: &str) -> Option<Entity> {
        self.bodies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, e)| *e)
    }

    pub fn name_of(&self, entity: Entity) -> Option<&str> {
        self.bodies
            .iter()
            .find(|(_, e)| *e == entity)
            .map(|(n, _)| n.as_str())
    }

    pub fn gravity_pairs(&self) -> &[Pair] {
        &self.gravity_pairs
    }

    pub fn collision_pairs(&self) -> &[Pair] {
        &self.collision_pairs
    }

    /// Drop a body and every pair that references it.
    /// Returns false if the entity was not on the roster.
    pub fn retire(&mut self, entity: Entity) -> bool {
        let before = self.bodies.len();
        self.bodies.retain(|(_, e)| *e != entity);
        self.gravity_pairs.retain(|p| !p.involves(entity));
        self.collision_pairs.retain(|p| !p.involves(entity));
        self.bodies.len() != before
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
