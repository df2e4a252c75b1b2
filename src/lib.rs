pub mod config;
pub mod error;
pub mod metrics;
pub mod playback;
pub mod render;
pub mod run;
pub mod sequence;
pub mod sorter;
pub mod tags;
mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use config::{Config, Pacing};
pub use error::{Cancelled, ConfigError};
pub use metrics::Metrics;
pub use playback::{Command, Playback, PlaybackHandle, PlaybackState};
pub use render::{Frame, NullSink, RecordingSink, RenderSink, TerminalSink, Theme, ThemeSwitch};
pub use run::{Outcome, Run, RunReport, Session};
pub use sequence::generate;
pub use sorter::{sort, steps, Algorithm, Complexity, Sorter, Step};
pub use tags::{Tag, TagMap};
