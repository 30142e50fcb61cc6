// Copyright 2025 dentsusoken
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


use crate::indicator::{ProgressConfig, ProgressIndicator, ProgressStyle};
use std::sync::mpsc::{Receiver, Sender};

/// Receives download progress on the worker thread.
///
/// Implementations must not touch UI state directly; they post updates to
/// whoever renders them.
pub trait ProgressReporter: Send {
    fn on_start(&mut self, _total_bytes: u64) {}

    /// Called after every chunk. `total_bytes == 0` means the size is unknown.
    fn on_progress(&mut self, bytes_so_far: u64, total_bytes: u64);

    fn on_complete(&mut self) {}
}

/// Update posted from a download worker to the presentation thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    Started { total_bytes: u64 },
    Progress { bytes_so_far: u64, total_bytes: u64 },
    Finished,
}

/// Forwards progress as `ProgressEvent`s over a channel.
pub struct ChannelProgress {
    sender: Sender<ProgressEvent>,
}

impl ChannelProgress {
    pub fn new(sender: Sender<ProgressEvent>) -> Self {
        Self { sender }
    }

    fn post(&self, event: ProgressEvent) {
        // The receiver may have gone away; the download itself keeps going.
        let _ = self.sender.send(event);
    }
}

impl ProgressReporter for ChannelProgress {
    fn on_start(&mut self, total_bytes: u64) {
        self.post(ProgressEvent::Started { total_bytes });
    }

    fn on_progress(&mut self, bytes_so_far: u64, total_bytes: u64) {
        self.post(ProgressEvent::Progress {
            bytes_so_far,
            total_bytes,
        });
    }

    fn on_complete(&mut self) {
        self.post(ProgressEvent::Finished);
    }
}

/// Calls a closure with `(bytes_so_far, total_bytes)`.
pub struct CallbackProgress<F>
where
    F: FnMut(u64, u64) + Send,
{
    callback: F,
}

impl<F> CallbackProgress<F>
where
    F: FnMut(u64, u64) + Send,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for CallbackProgress<F>
where
    F: FnMut(u64, u64) + Send,
{
    fn on_progress(&mut self, bytes_so_far: u64, total_bytes: u64) {
        (self.callback)(bytes_so_far, total_bytes);
    }
}

/// Drain `events` into `indicator` until the sending side hangs up.
pub fn render_progress_events(
    events: Receiver<ProgressEvent>,
    indicator: &mut dyn ProgressIndicator,
    context: &str,
) {
    let mut started = false;

    for event in events {
        match event {
            ProgressEvent::Started { total_bytes } => {
                let mut config = ProgressConfig::new("Downloading", context, ProgressStyle::Bytes);
                if total_bytes > 0 {
                    config = config.with_total(total_bytes);
                }
                indicator.start(config);
                started = true;
            }
            ProgressEvent::Progress {
                bytes_so_far,
                total_bytes,
            } => {
                let total = (total_bytes > 0).then_some(total_bytes);
                indicator.update(bytes_so_far, total);
            }
            ProgressEvent::Finished => {
                indicator.complete(Some("Download complete".to_string()));
                started = false;
            }
        }
    }

    if started {
        indicator.error("Download interrupted".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorded {
        calls: Vec<String>,
    }

    struct RecordingIndicator(Arc<Mutex<Recorded>>);

    impl ProgressIndicator for RecordingIndicator {
        fn start(&mut self, config: ProgressConfig) {
            self.0
                .lock()
                .unwrap()
                .calls
                .push(format!("start:{:?}", config.total));
        }

        fn update(&mut self, current: u64, total: Option<u64>) {
            self.0
                .lock()
                .unwrap()
                .calls
                .push(format!("update:{current}:{total:?}"));
        }

        fn set_message(&mut self, _message: String) {}

        fn complete(&mut self, _message: Option<String>) {
            self.0.lock().unwrap().calls.push("complete".to_string());
        }

        fn error(&mut self, _message: String) {
            self.0.lock().unwrap().calls.push("error".to_string());
        }
    }

    #[test]
    fn test_channel_progress_posts_events() {
        let (sender, receiver) = mpsc::channel();
        let mut reporter = ChannelProgress::new(sender);

        reporter.on_start(10);
        reporter.on_progress(4, 10);
        reporter.on_complete();
        drop(reporter);

        let events: Vec<_> = receiver.iter().collect();
        assert_eq!(
            events,
            vec![
                ProgressEvent::Started { total_bytes: 10 },
                ProgressEvent::Progress {
                    bytes_so_far: 4,
                    total_bytes: 10
                },
                ProgressEvent::Finished,
            ]
        );
    }

    #[test]
    fn test_channel_progress_survives_dropped_receiver() {
        let (sender, receiver) = mpsc::channel();
        drop(receiver);
        let mut reporter = ChannelProgress::new(sender);
        reporter.on_progress(1, 0);
    }

    #[test]
    fn test_callback_progress() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut reporter = CallbackProgress::new(move |done, total| {
            sink.lock().unwrap().push((done, total));
        });

        reporter.on_start(0);
        reporter.on_progress(8192, 0);
        reporter.on_progress(9000, 0);

        assert_eq!(*seen.lock().unwrap(), vec![(8192, 0), (9000, 0)]);
    }

    #[test]
    fn test_render_progress_events() {
        let (sender, receiver) = mpsc::channel();
        sender.send(ProgressEvent::Started { total_bytes: 0 }).unwrap();
        sender
            .send(ProgressEvent::Progress {
                bytes_so_far: 5,
                total_bytes: 0,
            })
            .unwrap();
        sender.send(ProgressEvent::Finished).unwrap();
        drop(sender);

        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let mut indicator = RecordingIndicator(recorded.clone());
        render_progress_events(receiver, &mut indicator, "jdk-21");

        assert_eq!(
            recorded.lock().unwrap().calls,
            vec!["start:None", "update:5:None", "complete"]
        );
    }

    #[test]
    fn test_render_reports_interrupted_download() {
        let (sender, receiver) = mpsc::channel();
        sender.send(ProgressEvent::Started { total_bytes: 100 }).unwrap();
        drop(sender);

        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let mut indicator = RecordingIndicator(recorded.clone());
        render_progress_events(receiver, &mut indicator, "jdk-21");

        assert_eq!(
            recorded.lock().unwrap().calls,
            vec!["start:Some(100)", "error"]
        );
    }
}
