// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The background shader install worker.
//!
//! Shader source handed to the engine is installed off the control context:
//! requests go down a task channel to a dedicated thread, outcomes come back
//! on a results channel, and the render-event consumer adopts them at the
//! frame boundary so new programs take effect at the same sync point as
//! uniform batches.
//!
//! Compilation itself is the GPU backend's concern and happens out of band;
//! this worker validates the payload shape and tracks timing.

use glint_core::error::MaterialError;
use glint_core::material::{MaterialId, ShaderSourceSet, StageSource};
use std::thread;
use std::time::Instant;

/// One queued install: a material and the source for both stages.
#[derive(Debug)]
pub(crate) struct InstallRequest {
    pub(crate) id: MaterialId,
    pub(crate) sources: ShaderSourceSet,
}

/// What the worker produced for one request.
#[derive(Debug)]
pub(crate) struct InstallOutcome {
    pub(crate) id: MaterialId,
    pub(crate) result: Result<(), String>,
    pub(crate) duration_ms: u64,
}

/// Handle to the install thread.
///
/// Dropping the worker closes the task channel, which ends the thread's
/// receive loop; the drop then joins it.
#[derive(Debug)]
pub(crate) struct InstallWorker {
    tasks: Option<flume::Sender<InstallRequest>>,
    results: flume::Receiver<InstallOutcome>,
    handle: Option<thread::JoinHandle<()>>,
}

impl InstallWorker {
    pub(crate) fn spawn() -> Self {
        let (task_tx, task_rx) = flume::unbounded::<InstallRequest>();
        let (result_tx, result_rx) = flume::unbounded::<InstallOutcome>();

        let handle = thread::spawn(move || {
            while let Ok(request) = task_rx.recv() {
                let outcome = run_install(request);
                if result_tx.send(outcome).is_err() {
                    // The engine side is gone; nothing left to report to.
                    break;
                }
            }
            log::debug!("Shader install worker shutting down.");
        });

        Self {
            tasks: Some(task_tx),
            results: result_rx,
            handle: Some(handle),
        }
    }

    /// Queues one install request for the worker thread.
    pub(crate) fn queue(&self, request: InstallRequest) -> Result<(), MaterialError> {
        let Some(tasks) = self.tasks.as_ref() else {
            return Err(MaterialError::InstallQueueClosed);
        };
        tasks
            .send(request)
            .map_err(|_| MaterialError::InstallQueueClosed)
    }

    /// The channel finished installs arrive on, drained by the consumer at
    /// the frame boundary.
    pub(crate) fn finished(&self) -> &flume::Receiver<InstallOutcome> {
        &self.results
    }
}

impl Drop for InstallWorker {
    fn drop(&mut self) {
        self.tasks.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run_install(request: InstallRequest) -> InstallOutcome {
    let started = Instant::now();
    let result = validate(&request.sources);
    InstallOutcome {
        id: request.id,
        result,
        duration_ms: started.elapsed().as_millis() as u64,
    }
}

fn validate(sources: &ShaderSourceSet) -> Result<(), String> {
    let stages: [(&str, &StageSource); 2] = [
        ("fragment", &sources.fragment),
        ("vertex", &sources.vertex),
    ];
    for (stage, source) in stages {
        if source.source.trim().is_empty() {
            return Err(format!("{stage} stage has no source text"));
        }
        if source.entry_point.trim().is_empty() {
            return Err(format!("{stage} stage has no entry-point name"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn valid_sources() -> ShaderSourceSet {
        ShaderSourceSet::new("frag", "fragMain", "vert", "vertMain")
    }

    #[test]
    fn valid_source_installs_successfully() {
        let worker = InstallWorker::spawn();
        worker
            .queue(InstallRequest {
                id: MaterialId(1),
                sources: valid_sources(),
            })
            .unwrap();

        let outcome = worker
            .finished()
            .recv_timeout(Duration::from_secs(2))
            .expect("worker should produce an outcome");
        assert_eq!(outcome.id, MaterialId(1));
        assert_eq!(outcome.result, Ok(()));
    }

    #[test]
    fn empty_source_or_entry_point_fails_with_the_stage_named() {
        let worker = InstallWorker::spawn();
        worker
            .queue(InstallRequest {
                id: MaterialId(2),
                sources: ShaderSourceSet::new("", "fragMain", "vert", "vertMain"),
            })
            .unwrap();
        worker
            .queue(InstallRequest {
                id: MaterialId(3),
                sources: ShaderSourceSet::new("frag", "fragMain", "vert", "  "),
            })
            .unwrap();

        let first = worker
            .finished()
            .recv_timeout(Duration::from_secs(2))
            .unwrap();
        let second = worker
            .finished()
            .recv_timeout(Duration::from_secs(2))
            .unwrap();

        assert_eq!(first.id, MaterialId(2));
        assert_eq!(first.result, Err("fragment stage has no source text".to_string()));
        assert_eq!(second.id, MaterialId(3));
        assert_eq!(
            second.result,
            Err("vertex stage has no entry-point name".to_string())
        );
    }

    #[test]
    fn outcomes_arrive_in_request_order() {
        let worker = InstallWorker::spawn();
        for raw in 1..=5 {
            worker
                .queue(InstallRequest {
                    id: MaterialId(raw),
                    sources: valid_sources(),
                })
                .unwrap();
        }
        for raw in 1..=5 {
            let outcome = worker
                .finished()
                .recv_timeout(Duration::from_secs(2))
                .unwrap();
            assert_eq!(outcome.id, MaterialId(raw));
        }
    }

    #[test]
    fn drop_joins_the_worker() {
        let worker = InstallWorker::spawn();
        worker
            .queue(InstallRequest {
                id: MaterialId(1),
                sources: valid_sources(),
            })
            .unwrap();
        // Dropping must not hang even with work still queued.
        drop(worker);
    }
}
