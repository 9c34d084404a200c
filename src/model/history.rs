//! Rotation history used to turn resubmitted absolute angles into deltas

/// The last two absolute angles submitted for one placement.
///
/// Callers always resubmit the full current angle of a component, so an edit
/// applies `submitted - current` and then shifts the pair:
/// `previous <- current`, `current <- submitted`. A freshly parsed placement
/// has only `current` (its angle in the file).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleHistory {
    previous: Option<f64>,
    current: f64,
}

impl AngleHistory {
    /// History seeded with the angle a placement was read or created with
    pub fn new(initial: f64) -> Self {
        AngleHistory {
            previous: None,
            current: initial,
        }
    }

    /// Most recently submitted angle
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Angle submitted before the current one
    pub fn previous(&self) -> Option<f64> {
        self.previous
    }

    /// Delta that submitting `angle` would apply
    pub fn delta_for(&self, angle: f64) -> f64 {
        angle - self.current
    }

    /// Record a submission and return the delta to apply
    pub fn submit(&mut self, angle: f64) -> f64 {
        let delta = self.delta_for(angle);
        self.previous = Some(self.current);
        self.current = angle;
        delta
    }

    /// Values oldest first; never more than two
    pub fn entries(&self) -> Vec<f64> {
        match self.previous {
            Some(previous) => vec![previous, self.current],
            None => vec![self.current],
        }
    }

    /// Number of recorded values (1 or 2)
    pub fn len(&self) -> usize {
        if self.previous.is_some() {
            2
        } else {
            1
        }
    }

    /// Always false: a history holds at least its seed value
    pub fn is_empty(&self) -> bool {
        false
    }
}
