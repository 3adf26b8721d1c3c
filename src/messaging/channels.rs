// Event channels - lock-free, single producer / single consumer
//
// The model and the undo manager each own the producer side; rendering and
// toolbar code drain the consumers once per frame.

use crate::history::{HistoryConfig, UndoManager};
use crate::messaging::event::{HistoryEvent, ModelEvent};
use crate::model::GraphModel;
use ringbuf::{HeapRb, traits::Split};

pub type ModelEventProducer = ringbuf::HeapProd<ModelEvent>;
pub type ModelEventConsumer = ringbuf::HeapCons<ModelEvent>;

pub fn create_model_event_channel(capacity: usize) -> (ModelEventProducer, ModelEventConsumer) {
    let rb = HeapRb::<ModelEvent>::new(capacity);
    rb.split()
}

pub type HistoryEventProducer = ringbuf::HeapProd<HistoryEvent>;
pub type HistoryEventConsumer = ringbuf::HeapCons<HistoryEvent>;

pub fn create_history_event_channel(
    capacity: usize,
) -> (HistoryEventProducer, HistoryEventConsumer) {
    let rb = HeapRb::<HistoryEvent>::new(capacity);
    rb.split()
}

/// Listener ends of the model and history channels
pub struct EventListeners {
    pub model_events: ModelEventConsumer,
    pub history_events: HistoryEventConsumer,
}

/// Attach fresh channels, sized by `config.event_capacity`, to a model and
/// its undo manager. Any previously attached producers are replaced.
pub fn connect_listeners(
    config: &HistoryConfig,
    model: &mut GraphModel,
    history: &mut UndoManager,
) -> EventListeners {
    let capacity = config.event_capacity.max(1);
    let (model_tx, model_events) = create_model_event_channel(capacity);
    let (history_tx, history_events) = create_history_event_channel(capacity);
    model.set_event_producer(Some(model_tx));
    history.set_event_producer(Some(history_tx));
    EventListeners {
        model_events,
        history_events,
    }
}
