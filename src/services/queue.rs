// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity queue: publishing side plus the local worker pool.
//!
//! With Cloud Tasks the queue pushes each activity back over HTTP and the
//! task route runs the consumer. The local backend keeps everything in
//! process: a bounded channel drained by a fixed number of concurrent
//! workers, each handling one event at a time.

use crate::error::{AppError, Result};
use crate::models::Activity;
use crate::services::consumer::ActivityConsumer;
use crate::services::tasks::TasksService;
use futures_util::{stream, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Events buffered per worker before publishers see backpressure.
const LOCAL_QUEUE_DEPTH_PER_WORKER: usize = 16;

/// Where `publish` sends activities.
pub enum ActivityQueue {
    CloudTasks {
        tasks: TasksService,
        service_url: String,
    },
    Local(mpsc::Sender<Activity>),
}

impl ActivityQueue {
    /// Enqueue one activity for analysis.
    pub async fn publish(&self, activity: Activity) -> Result<()> {
        match self {
            ActivityQueue::CloudTasks { tasks, service_url } => {
                tasks.queue_activity(service_url, &activity).await
            }
            ActivityQueue::Local(sender) => sender
                .send(activity)
                .await
                .map_err(|_| AppError::Queue("Local worker pool has shut down".to_string())),
        }
    }
}

/// Spawn `workers` concurrent consumers on a new local queue.
///
/// The pool runs until every sender is dropped and the queue drains.
pub fn spawn_local_workers(
    consumer: Arc<ActivityConsumer>,
    workers: usize,
) -> (ActivityQueue, JoinHandle<()>) {
    let workers = workers.max(1);
    let (sender, receiver) = mpsc::channel(workers * LOCAL_QUEUE_DEPTH_PER_WORKER);

    let handle = tokio::spawn(run_workers(consumer, receiver, workers));
    tracing::info!(workers, "Local activity workers started");

    (ActivityQueue::Local(sender), handle)
}

async fn run_workers(
    consumer: Arc<ActivityConsumer>,
    receiver: mpsc::Receiver<Activity>,
    workers: usize,
) {
    let events = stream::unfold(receiver, |mut receiver| async move {
        receiver.recv().await.map(|activity| (activity, receiver))
    });

    events
        .for_each_concurrent(workers, |activity| {
            let consumer = Arc::clone(&consumer);
            async move {
                // No redelivery in process: a failed store write is logged
                // and the event is dropped.
                if let Err(e) = consumer.process(&activity).await {
                    tracing::error!(
                        activity_id = %activity.id,
                        error = %e,
                        "Dropping activity after store failure"
                    );
                }
            }
        })
        .await;

    tracing::info!("Local activity workers stopped");
}
