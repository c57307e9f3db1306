use crate::model::knob::KnobSpec;

/// One frame of a sweep. The spec is shared, never copied per frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub index: u32,
    pub angle: f64,
    pub spec: &'a KnobSpec,
}

/// Stateless index-to-angle mapping over a spec's sweep.
#[derive(Clone, Copy, Debug)]
pub struct FrameSequence<'a> {
    spec: &'a KnobSpec,
}

impl<'a> FrameSequence<'a> {
    pub fn new(spec: &'a KnobSpec) -> Self {
        Self { spec }
    }

    pub fn len(&self) -> u32 {
        self.spec.frame_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rotation of frame `index`, in degrees.
    ///
    /// With more than one frame the sweep is sampled evenly and the last index lands exactly on
    /// `end_angle`. A single frame shows the neutral angle, or `start_angle` when none is set.
    /// Indices past the end clamp to the last frame.
    pub fn angle_at(&self, index: u32) -> f64 {
        let n = self.len();
        let start = self.spec.start_angle();
        let end = self.spec.end_angle();
        if n <= 1 {
            return self.spec.neutral_angle().unwrap_or(start);
        }
        let last = n - 1;
        if index >= last {
            return end;
        }
        start + (end - start) * f64::from(index) / f64::from(last)
    }

    pub fn frame(&self, index: u32) -> Frame<'a> {
        Frame {
            index,
            angle: self.angle_at(index),
            spec: self.spec,
        }
    }

    /// Angles in index order. Each call starts from frame 0.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        (0..self.len()).map(|i| self.angle_at(i))
    }

    pub fn frames(&self) -> impl ExactSizeIterator<Item = Frame<'a>> + '_ {
        (0..self.len()).map(|i| self.frame(i))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/frames.rs"]
mod tests;
