//! Change notifications emitted by [`TreeModel`](super::TreeModel)
//!
//! Every structural mutation is bracketed by an `*AboutTo*` event and its
//! completion event. Observers see the tree in its old shape during the first
//! and in its new shape during the second, never in between.

use std::cell::RefCell;
use std::rc::Rc;

use super::index::{ItemRole, ModelIndex, Orientation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    RowsAboutToBeInserted {
        parent: Option<ModelIndex>,
        first: usize,
        last: usize,
    },
    RowsInserted {
        parent: Option<ModelIndex>,
        first: usize,
        last: usize,
    },
    RowsAboutToBeRemoved {
        parent: Option<ModelIndex>,
        first: usize,
        last: usize,
    },
    RowsRemoved {
        parent: Option<ModelIndex>,
        first: usize,
        last: usize,
    },
    ColumnsAboutToBeInserted {
        parent: Option<ModelIndex>,
        first: usize,
        last: usize,
    },
    ColumnsInserted {
        parent: Option<ModelIndex>,
        first: usize,
        last: usize,
    },
    ColumnsAboutToBeRemoved {
        parent: Option<ModelIndex>,
        first: usize,
        last: usize,
    },
    ColumnsRemoved {
        parent: Option<ModelIndex>,
        first: usize,
        last: usize,
    },
    DataChanged {
        top_left: ModelIndex,
        bottom_right: ModelIndex,
        roles: Vec<ItemRole>,
    },
    HeaderDataChanged {
        orientation: Orientation,
        first: usize,
        last: usize,
    },
    ModelAboutToBeReset,
    ModelReset,
}

impl ModelEvent {
    /// True for the opening half of a begin/end pair.
    pub fn is_begin(&self) -> bool {
        matches!(
            self,
            ModelEvent::RowsAboutToBeInserted { .. }
                | ModelEvent::RowsAboutToBeRemoved { .. }
                | ModelEvent::ColumnsAboutToBeInserted { .. }
                | ModelEvent::ColumnsAboutToBeRemoved { .. }
                | ModelEvent::ModelAboutToBeReset
        )
    }
}

/// Receives model notifications, e.g. a view keeping selection and scroll state.
pub trait ModelObserver {
    fn notify(&mut self, event: &ModelEvent);
}

impl<F> ModelObserver for F
where
    F: FnMut(&ModelEvent),
{
    fn notify(&mut self, event: &ModelEvent) {
        self(event)
    }
}

/// Observer that records every event; clones share one log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<ModelEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ModelEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl ModelObserver for EventLog {
    fn notify(&mut self, event: &ModelEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
