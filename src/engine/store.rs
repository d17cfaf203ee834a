use crate::engine::entity::{Cat, Sparkle};

/// Owning container for all live entities.
///
/// Dense Vecs, iterated in array order; order carries no meaning (layering
/// is handled by separate draw passes). Removal is swap-with-last, so
/// culling stays O(1) per sparkle and there is nothing to dangle.
#[derive(Debug, Default)]
pub struct EntityStore {
    cats: Vec<Cat>,
    sparkles: Vec<Sparkle>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            cats: Vec::new(),
            sparkles: Vec::with_capacity(128),
        }
    }

    pub fn add_cat(&mut self, cat: Cat) {
        self.cats.push(cat);
    }

    pub fn add_sparkle(&mut self, sparkle: Sparkle) {
        self.sparkles.push(sparkle);
    }

    pub fn cats(&self) -> &[Cat] {
        &self.cats
    }

    pub fn sparkles(&self) -> &[Sparkle] {
        &self.sparkles
    }

    /// Update every sparkle in place, swap-removing the ones `retain`
    /// rejects after their update. Entities already visited this tick are
    /// never disturbed: swap_remove pulls the replacement from the
    /// not-yet-visited tail.
    pub fn update_sparkles(&mut self, mut update: impl FnMut(&mut Sparkle) -> bool) {
        let mut i = 0;
        while i < self.sparkles.len() {
            if update(&mut self.sparkles[i]) {
                i += 1;
            } else {
                self.sparkles.swap_remove(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::entity::Point;

    fn sparkle_at(x: i32) -> Sparkle {
        Sparkle {
            pos: Point::new(x, 0),
            frame: 1,
            step: 1,
            speed: 0,
            layer: 0,
        }
    }

    #[test]
    fn removing_head_keeps_the_rest() {
        let mut store = EntityStore::new();
        for x in [10, 20, 30] {
            store.add_sparkle(sparkle_at(x));
        }
        store.update_sparkles(|s| s.pos.x != 10);

        let mut xs: Vec<i32> = store.sparkles().iter().map(|s| s.pos.x).collect();
        xs.sort_unstable();
        assert_eq!(xs, vec![20, 30]);
    }

    #[test]
    fn removing_middle_loses_nothing_and_duplicates_nothing() {
        let mut store = EntityStore::new();
        for x in [10, 20, 30, 40] {
            store.add_sparkle(sparkle_at(x));
        }
        store.update_sparkles(|s| s.pos.x != 30);

        let mut xs: Vec<i32> = store.sparkles().iter().map(|s| s.pos.x).collect();
        xs.sort_unstable();
        assert_eq!(xs, vec![10, 20, 40]);
    }

    #[test]
    fn every_survivor_is_visited_exactly_once() {
        let mut store = EntityStore::new();
        for x in 0..50 {
            store.add_sparkle(sparkle_at(x));
        }
        let mut visited = Vec::new();
        store.update_sparkles(|s| {
            visited.push(s.pos.x);
            s.pos.x % 3 != 0
        });

        // Every entity was updated once, removed or not.
        visited.sort_unstable();
        assert_eq!(visited, (0..50).collect::<Vec<_>>());
        assert_eq!(store.sparkles().len(), (0..50).filter(|x| x % 3 != 0).count());
    }

    #[test]
    fn cats_are_append_only() {
        let mut store = EntityStore::new();
        store.add_cat(Cat::new(100, 200));
        store.add_cat(Cat::new(300, 400));
        assert_eq!(store.cats().len(), 2);
        assert_eq!(store.cats()[0].pos, Point::new(100, 200));
    }
}
