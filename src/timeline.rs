// Places tweens one after another on a shared clock. Positions are relative
// to the current end of the timeline; a negative offset overlaps the
// previous entry.

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Position {
    // Right after everything placed so far
    End,
    // Offset in seconds from the current end, e.g. "-=0.4" is `Relative(-0.4)`
    Relative(f64),
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    delay: f64,
    end: f64,
}

impl Timeline {
    pub fn new(delay: f64) -> Timeline {
        Timeline {
            delay: delay.max(0.0),
            end: 0.0,
        }
    }

    // Length of the timeline excluding its initial delay
    pub fn duration(&self) -> f64 {
        self.end
    }

    fn resolve(&self, position: Position) -> f64 {
        match position {
            Position::End => self.end,
            Position::Relative(offset) => (self.end + offset).max(0.0),
        }
    }

    // Places one entry and returns its absolute start time, delay included
    pub fn add(&mut self, duration: f64, position: Position) -> f64 {
        let start = self.resolve(position);
        self.end = self.end.max(start + duration);
        self.delay + start
    }

    // Places `count` entries of equal length, each starting `stagger`
    // seconds after the previous one
    pub fn add_staggered(
        &mut self,
        count: usize,
        duration: f64,
        stagger: f64,
        position: Position,
    ) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }
        let start = self.resolve(position);
        let starts: Vec<f64> = (0..count)
            .map(|i| self.delay + start + stagger * i as f64)
            .collect();
        self.end = self.end.max(start + stagger * (count - 1) as f64 + duration);
        starts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn sequential_entries_follow_each_other() {
        let mut tl = Timeline::new(0.0);
        assert_eq!(tl.add(1.0, Position::End), 0.0);
        assert_eq!(tl.add(0.5, Position::End), 1.0);
        assert!(close(tl.duration(), 1.5));
    }

    #[test]
    fn negative_offset_overlaps_previous() {
        let mut tl = Timeline::new(1.8);
        let words = tl.add_staggered(3, 0.9, 0.12, Position::End);
        assert!(close(words[0], 1.8));
        assert!(close(words[2], 2.04));
        // words end at 0.24 + 0.9 = 1.14
        let badge = tl.add(0.6, Position::Relative(-0.4));
        assert!(close(badge, 1.8 + 0.74));
        let desc = tl.add(0.6, Position::Relative(-0.3));
        assert!(close(desc, 1.8 + 1.04));
    }

    #[test]
    fn offset_never_precedes_start() {
        let mut tl = Timeline::new(0.0);
        assert_eq!(tl.add(0.5, Position::Relative(-2.0)), 0.0);
    }

    #[test]
    fn empty_stagger_leaves_timeline_untouched() {
        let mut tl = Timeline::new(0.0);
        tl.add(1.0, Position::End);
        assert!(tl.add_staggered(0, 1.0, 0.1, Position::End).is_empty());
        assert!(close(tl.duration(), 1.0));
    }
}
