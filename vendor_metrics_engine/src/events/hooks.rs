use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{EventHandler, EventProducer, Handler, MetricsUpdatedEvent, SnapshotCompletedEvent};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub metrics_updated_producer: Vec<EventProducer<MetricsUpdatedEvent>>,
    pub snapshot_completed_producer: Vec<EventProducer<SnapshotCompletedEvent>>,
}

impl EventProducers {
    pub async fn publish_metrics_updated(&self, event: MetricsUpdatedEvent) {
        for producer in &self.metrics_updated_producer {
            producer.publish_event(event.clone()).await;
        }
    }

    pub async fn publish_snapshot_completed(&self, event: SnapshotCompletedEvent) {
        for producer in &self.snapshot_completed_producer {
            producer.publish_event(event.clone()).await;
        }
    }
}

pub struct EventHandlers {
    pub on_metrics_updated: Option<EventHandler<MetricsUpdatedEvent>>,
    pub on_snapshot_completed: Option<EventHandler<SnapshotCompletedEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_metrics_updated = hooks.on_metrics_updated.map(|f| EventHandler::new(buffer_size, f));
        let on_snapshot_completed = hooks.on_snapshot_completed.map(|f| EventHandler::new(buffer_size, f));
        Self { on_metrics_updated, on_snapshot_completed }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_metrics_updated {
            result.metrics_updated_producer.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_snapshot_completed {
            result.snapshot_completed_producer.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_metrics_updated {
            tokio::spawn(handler.start_handler());
        }
        if let Some(handler) = self.on_snapshot_completed {
            tokio::spawn(handler.start_handler());
        }
    }
}

pub type BoxedFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_metrics_updated: Option<Handler<MetricsUpdatedEvent>>,
    pub on_snapshot_completed: Option<Handler<SnapshotCompletedEvent>>,
}

impl EventHooks {
    pub fn on_metrics_updated<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(MetricsUpdatedEvent) -> BoxedFuture) + Send + Sync + 'static {
        self.on_metrics_updated = Some(Arc::new(f));
        self
    }

    pub fn on_snapshot_completed<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(SnapshotCompletedEvent) -> BoxedFuture) + Send + Sync + 'static {
        self.on_snapshot_completed = Some(Arc::new(f));
        self
    }
}
