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


//! Archive downloads: chunked streaming, progress events, cancellation and checksum checks.

mod checksum;
mod client;
mod http_file_downloader;
mod options;
mod progress;

pub use checksum::{calculate_sha256, verify_checksum};
pub use client::{AttohttpcClient, DEFAULT_TIMEOUT, HttpClient, HttpResponse};
pub use http_file_downloader::{DOWNLOAD_CHUNK_SIZE, HttpFileDownloader};
pub use options::{DownloadOptions, MAX_DOWNLOAD_SIZE};
pub use progress::{
    CallbackProgress, ChannelProgress, ProgressEvent, ProgressReporter, render_progress_events,
};
