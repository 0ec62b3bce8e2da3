use crate::step::Step;
use crate::step_log::StepLog;

/// Forward/backward navigation over a recorded run
///
/// Moving past either end is a no-op. Each cursor only borrows the log, so
/// several of them can replay the same run independently.
#[derive(Clone, Copy, Debug)]
pub struct ReplayCursor<'a, T> {
    log: &'a StepLog<T>,
    position: usize,
}

impl<'a, T> ReplayCursor<'a, T> {
    pub fn new(log: &'a StepLog<T>) -> Self {
        Self::at(log, 0)
    }

    /// Cursor on a given step (clamped to the last one)
    pub fn at(log: &'a StepLog<T>, position: usize) -> Self {
        let mut cursor = Self { log, position: 0 };
        cursor.seek(position);
        cursor
    }

    /// The step under the cursor
    pub fn current(&self) -> &'a Step<T> {
        &self.log.steps()[self.position]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves to the next step, returns false if already on the last one
    pub fn advance(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Moves to the previous step, returns false if already on the first one
    pub fn retreat(&mut self) -> bool {
        if self.is_at_start() {
            return false;
        }
        self.position -= 1;
        true
    }

    pub fn seek(&mut self, position: usize) {
        self.position = position.min(self.last_position());
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn fast_forward(&mut self) {
        self.position = self.last_position();
    }

    pub fn is_at_start(&self) -> bool {
        self.position == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.position == self.last_position()
    }

    pub fn log(&self) -> &'a StepLog<T> {
        self.log
    }

    #[inline]
    fn last_position(&self) -> usize {
        self.log.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use crate::options::SimulationOptions;
    use crate::step::StepAction;
    use crate::step_log::simulate;

    #[test]
    fn test_navigation() {
        let log = simulate(&[3, 1, 5, 12, 2, 11], 3, &SimulationOptions::default()).unwrap();
        let mut cursor = log.cursor();

        assert!(cursor.is_at_start());
        assert_eq!(cursor.current().action, StepAction::Start);
        assert!(!cursor.retreat());
        assert_eq!(cursor.position(), 0);

        for _ in 0..log.len() - 1 {
            assert!(cursor.advance());
        }
        assert!(cursor.is_at_end());
        assert!(!cursor.advance());
        assert_eq!(cursor.current(), log.last().unwrap());

        assert!(cursor.retreat());
        assert_eq!(cursor.current(), &log.steps()[log.len() - 2]);
    }

    #[test]
    fn test_seek() {
        let log = simulate(&[7, 2, 9], 2, &SimulationOptions::default()).unwrap();
        let mut cursor = log.cursor();

        cursor.seek(3);
        assert_eq!(cursor.position(), 3);
        cursor.seek(1000);
        assert!(cursor.is_at_end());
        cursor.rewind();
        assert!(cursor.is_at_start());
        cursor.fast_forward();
        assert_eq!(cursor.position(), log.len() - 1);
    }

    #[test]
    fn test_independent_cursors() {
        let log = simulate(&[4, 4, 4], 1, &SimulationOptions::default()).unwrap();
        let mut first = log.cursor();
        let second = super::ReplayCursor::at(&log, 2);

        first.advance();
        assert_eq!(first.position(), 1);
        assert_eq!(second.position(), 2);
        assert_eq!(second.current(), &log.steps()[2]);
    }
}
