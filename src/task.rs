//! Asynchronous scaling tasks.
//!
//! A [`ScaleTask`] runs one [`scale`](crate::scale::scale) call on a worker
//! thread: `Pending` until started, `Running` while the passes execute, then
//! exactly one of `Completed`, `Cancelled`, or `Failed`. Cancellation is
//! cooperative — [`ScaleTask::cancel`] raises the shared flag and the
//! convolution pass notices it at its next row boundary — and a cancelled
//! task's partially written buffer is discarded inside the orchestrator,
//! never delivered.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::thread::{self, JoinHandle};

use log::debug;

use crate::buffer::PixelBuffer;
use crate::error::ScaleError;
use crate::filters::ScaleFilter;
use crate::monitor::ScaleMonitor;
use crate::scale::scale;

/// Everything one scale operation needs, bundled for the worker thread.
#[derive(Debug, Clone)]
pub struct ScaleRequest {
    pub source: PixelBuffer,
    pub target_width: u32,
    pub target_height: u32,
    pub filter: ScaleFilter,
}

/// Lifecycle of a [`ScaleTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TaskState {
    Pending = 0,
    Running = 1,
    Completed = 2,
    Cancelled = 3,
    Failed = 4,
}

fn decode_state(value: u8) -> TaskState {
    match value {
        0 => TaskState::Pending,
        1 => TaskState::Running,
        2 => TaskState::Completed,
        3 => TaskState::Cancelled,
        _ => TaskState::Failed,
    }
}

type CompletionCallback = Box<dyn FnOnce(&Result<PixelBuffer, ScaleError>) + Send + 'static>;

/// State shared between the task handle and its worker thread.
struct TaskShared {
    monitor: ScaleMonitor,
    state: AtomicU8,
}

/// A scale operation running (or about to run) on a worker thread.
pub struct ScaleTask {
    shared: Arc<TaskShared>,
    request: Option<ScaleRequest>,
    callback: Option<CompletionCallback>,
    worker: Option<JoinHandle<Result<PixelBuffer, ScaleError>>>,
}

impl ScaleTask {
    /// A new task in the `Pending` state. Nothing runs until [`start`] or
    /// [`join`] is called.
    ///
    /// [`start`]: ScaleTask::start
    /// [`join`]: ScaleTask::join
    pub fn new(request: ScaleRequest) -> ScaleTask {
        ScaleTask {
            shared: Arc::new(TaskShared {
                monitor: ScaleMonitor::new(),
                state: AtomicU8::new(TaskState::Pending as u8),
            }),
            request: Some(request),
            callback: None,
            worker: None,
        }
    }

    /// Register a completion callback, invoked on the worker thread with the
    /// finished result after the terminal state is published. The buffer
    /// itself is still delivered through [`join`](ScaleTask::join).
    pub fn on_complete(
        mut self,
        callback: impl FnOnce(&Result<PixelBuffer, ScaleError>) + Send + 'static,
    ) -> ScaleTask {
        self.callback = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> TaskState {
        decode_state(self.shared.state.load(Ordering::Acquire))
    }

    /// Completion fraction last reported by the running operation.
    pub fn progress(&self) -> f64 {
        self.shared.monitor.progress()
    }

    /// Request cooperative cancellation. Effective even before [`start`]:
    /// the worker then stops at its first row.
    ///
    /// [`start`]: ScaleTask::start
    pub fn cancel(&self) {
        self.shared.monitor.cancel();
    }

    /// Transition `Pending → Running` and spawn the worker. Calling this on
    /// an already started task does nothing.
    pub fn start(&mut self) {
        let Some(request) = self.request.take() else {
            return;
        };
        let callback = self.callback.take();
        let shared = Arc::clone(&self.shared);

        debug!(
            "starting scale task {}x{} -> {}x{}",
            request.source.width(),
            request.source.height(),
            request.target_width,
            request.target_height
        );
        shared
            .state
            .store(TaskState::Running as u8, Ordering::Release);

        self.worker = Some(thread::spawn(move || {
            let result = scale(
                &request.source,
                request.target_width,
                request.target_height,
                request.filter,
                Some(&shared.monitor),
            );

            let state = match &result {
                Ok(_) => TaskState::Completed,
                Err(ScaleError::Cancelled) => TaskState::Cancelled,
                Err(_) => TaskState::Failed,
            };
            shared.state.store(state as u8, Ordering::Release);

            if let Some(callback) = callback {
                callback(&result);
            }
            result
        }));
    }

    /// Wait for the worker and deliver its result, starting the task first
    /// if it is still pending.
    pub fn join(mut self) -> Result<PixelBuffer, ScaleError> {
        if self.worker.is_none() {
            self.start();
        }
        self.worker
            .take()
            .expect("start() always attaches a worker")
            .join()
            .expect("scale worker panicked")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    fn request(size: u32, target: u32) -> ScaleRequest {
        ScaleRequest {
            source: PixelBuffer::from_fn(size, size, |_, _| 0xFF33_66_99).unwrap(),
            target_width: target,
            target_height: target,
            filter: ScaleFilter::GOOD,
        }
    }

    fn wait_terminal(task: &ScaleTask) -> TaskState {
        for _ in 0..5_000 {
            let state = task.state();
            if state != TaskState::Running && state != TaskState::Pending {
                return state;
            }
            thread::sleep(Duration::from_millis(1));
        }
        panic!("task never reached a terminal state");
    }

    #[test]
    fn new_task_is_pending() {
        let task = ScaleTask::new(request(8, 4));
        assert_eq!(task.state(), TaskState::Pending);
        assert_eq!(task.progress(), 0.0);
    }

    #[test]
    fn task_completes_and_delivers_the_buffer() {
        let mut task = ScaleTask::new(request(8, 4));
        task.start();
        let state = wait_terminal(&task);
        assert_eq!(state, TaskState::Completed);

        let buffer = task.join().unwrap();
        assert_eq!((buffer.width(), buffer.height()), (4, 4));
        assert_eq!(buffer.get_pixel(2, 2), 0xFF33_66_99);
    }

    #[test]
    fn join_starts_a_pending_task() {
        let buffer = ScaleTask::new(request(8, 2)).join().unwrap();
        assert_eq!((buffer.width(), buffer.height()), (2, 2));
    }

    #[test]
    fn cancel_before_start_yields_cancelled() {
        let task = ScaleTask::new(request(16, 8));
        task.cancel();
        assert_eq!(task.join(), Err(ScaleError::Cancelled));
    }

    #[test]
    fn cancelled_task_reports_cancelled_state() {
        let mut task = ScaleTask::new(request(16, 8));
        task.cancel();
        task.start();
        assert_eq!(wait_terminal(&task), TaskState::Cancelled);
    }

    #[test]
    fn invalid_request_fails() {
        let mut task = ScaleTask::new(request(8, 0));
        task.start();
        assert_eq!(wait_terminal(&task), TaskState::Failed);
        assert_eq!(task.join(), Err(ScaleError::InvalidDimensions));
    }

    #[test]
    fn callback_sees_the_result_after_the_state_settles() {
        let seen: Arc<Mutex<Option<(TaskState, bool)>>> = Arc::new(Mutex::new(None));
        let seen_in_callback = Arc::clone(&seen);

        let task = ScaleTask::new(request(8, 4));
        let shared = Arc::clone(&task.shared);
        let mut task = task.on_complete(move |result| {
            let state = decode_state(shared.state.load(Ordering::Acquire));
            *seen_in_callback.lock().unwrap() = Some((state, result.is_ok()));
        });
        task.start();
        task.join().unwrap();

        assert_eq!(*seen.lock().unwrap(), Some((TaskState::Completed, true)));
    }

    #[test]
    fn start_twice_is_harmless() {
        let mut task = ScaleTask::new(request(8, 4));
        task.start();
        task.start();
        assert!(task.join().is_ok());
    }
}
