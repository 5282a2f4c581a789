/// What selecting the already-selected endpoint again means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatPolicy {
    /// Deselect. Used for tag pairs.
    Cancel,
    /// Pair the endpoint with itself. Used for single-word arches.
    Pair,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent<T> {
    Pending(T),
    Cancelled,
    Pair(T, T),
}

/// Two-click selection of a pair of endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    first: Option<T>,
    policy: RepeatPolicy,
}

impl<T: Copy + PartialEq> Selection<T> {
    pub fn new(policy: RepeatPolicy) -> Self {
        Self { first: None, policy }
    }

    pub fn pending(&self) -> Option<T> {
        self.first
    }

    pub fn select(&mut self, endpoint: T) -> SelectionEvent<T> {
        match self.first.take() {
            None => {
                self.first = Some(endpoint);
                SelectionEvent::Pending(endpoint)
            }
            Some(first) if first == endpoint => match self.policy {
                RepeatPolicy::Cancel => SelectionEvent::Cancelled,
                RepeatPolicy::Pair => SelectionEvent::Pair(first, endpoint),
            },
            Some(first) => SelectionEvent::Pair(first, endpoint),
        }
    }

    pub fn cancel(&mut self) {
        self.first = None;
    }
}
