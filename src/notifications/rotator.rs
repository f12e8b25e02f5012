use rand::seq::SliceRandom;
use rand::Rng;

/// Hands out names in shuffled round-robin order, reshuffling on wrap.
#[derive(Debug, Clone)]
pub struct NameRotator {
    names: Vec<String>,
    cursor: usize,
}

impl NameRotator {
    pub fn new<R, I, S>(names: I, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.shuffle(rng);
        Self { names, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn next_name<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        if self.names.is_empty() {
            return None;
        }
        if self.cursor >= self.names.len() {
            self.names.shuffle(rng);
            self.cursor = 0;
        }
        let name = self.names[self.cursor].clone();
        self.cursor += 1;
        Some(name)
    }

    /// Up to `count` distinct names. A reshuffle can repeat the previous name,
    /// so duplicates are skipped rather than returned.
    pub fn pick<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Vec<String> {
        let wanted = count.min(self.names.len());
        let mut picked: Vec<String> = Vec::with_capacity(wanted);
        let mut attempts = 0;
        while picked.len() < wanted && attempts < self.names.len() + wanted {
            attempts += 1;
            if let Some(name) = self.next_name(rng) {
                if !picked.contains(&name) {
                    picked.push(name);
                }
            }
        }
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn each_name_once_per_cycle() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut rotator = NameRotator::new(["a", "b", "c", "d"], &mut rng);

        for _ in 0..3 {
            let cycle: HashSet<String> = (0..4)
                .filter_map(|_| rotator.next_name(&mut rng))
                .collect();
            assert_eq!(cycle.len(), 4);
        }
    }

    #[test]
    fn pick_returns_distinct_names() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut rotator = NameRotator::new(["a", "b"], &mut rng);
        for _ in 0..20 {
            let picked = rotator.pick(2, &mut rng);
            assert_eq!(picked.len(), 2);
            assert_ne!(picked[0], picked[1]);
        }
    }

    #[test]
    fn empty_rotator_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut rotator = NameRotator::new(Vec::<String>::new(), &mut rng);
        assert!(rotator.next_name(&mut rng).is_none());
        assert!(rotator.pick(2, &mut rng).is_empty());
    }
}
