use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Config, Pacing};
use crate::error::Cancelled;
use crate::metrics::Metrics;
use crate::playback::{Command, Playback, PlaybackHandle};
use crate::render::{Frame, RenderSink};
use crate::sequence::generate;
use crate::sorter::{Algorithm, Sorter, Step};
use crate::tags::{Tag, TagMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: Outcome,
    pub sequence: Vec<u32>,
    /// Zero after a cancelled run.
    pub metrics: Metrics,
    pub steps: usize,
}

/// Context of a single run: the sequence, its tags and counters, and the
/// playback it answers to. Consumed by `execute`.
pub struct Run<'s, S: RenderSink + ?Sized> {
    algorithm: Algorithm,
    sequence: Vec<u32>,
    max_value: u32,
    tags: TagMap,
    metrics: Metrics,
    playback: Playback,
    pacing: Pacing,
    steps: usize,
    sink: &'s mut S,
}

impl<'s, S: RenderSink + ?Sized> Run<'s, S> {
    pub fn new(
        algorithm: Algorithm,
        sequence: Vec<u32>,
        max_value: u32,
        playback: Playback,
        pacing: Pacing,
        sink: &'s mut S,
    ) -> Self {
        let len = sequence.len();
        Run {
            algorithm,
            sequence,
            max_value,
            tags: TagMap::new(len),
            metrics: Metrics::default(),
            playback: playback.poll_interval(pacing.poll_interval),
            pacing,
            steps: 0,
            sink,
        }
    }

    /// Drives the algorithm to completion or until a stop is observed.
    /// Cancellation is a normal outcome: the counters are reset and shown.
    pub fn execute(mut self) -> RunReport {
        info!("Starting {} on {} elements", self.algorithm, self.sequence.len());
        let start = Instant::now();
        let mut sorter = self.algorithm.sorter(self.sequence.len());

        let outcome = match self.drive(sorter.as_mut()) {
            Ok(()) => {
                info!(
                    "{} finished after {} steps in {:?}: {} comparisons, {} swaps",
                    self.algorithm, self.steps, start.elapsed(), self.metrics.comparisons, self.metrics.swaps
                );
                Outcome::Completed
            }
            Err(Cancelled) => {
                debug!("{} cancelled after {} steps", self.algorithm, self.steps);
                self.metrics.reset();
                self.sink.update_metrics(&self.metrics);
                Outcome::Cancelled
            }
        };

        RunReport {
            outcome,
            sequence: self.sequence,
            metrics: self.metrics,
            steps: self.steps,
        }
    }

    fn drive(&mut self, sorter: &mut dyn Sorter) -> Result<(), Cancelled> {
        self.render();
        self.playback.checkpoint()?;

        while let Some(step) = sorter.next_step(&mut self.sequence) {
            trace!("Step {}: {:?}", self.steps, step);
            self.steps += 1;
            self.apply(step);
            self.render();
            self.playback.checkpoint()?;
            pause_for(self.delay_for(step));
            self.tags.clear_transient();
        }
        Ok(())
    }

    fn apply(&mut self, step: Step) {
        if step.is_comparison() {
            self.metrics.record_comparison();
        }
        match step {
            Step::Compare(i, j) => {
                self.tags.mark_transient(i, Tag::Compare);
                self.tags.mark_transient(j, Tag::Compare);
            }
            Step::Swap(i, j) => {
                self.metrics.record_swap();
                self.tags.follow_swap(i, j);
                self.tags.mark_transient(i, Tag::Swap);
                self.tags.mark_transient(j, Tag::Swap);
            }
            Step::Place { index, compared } => {
                if compared {
                    self.tags.mark_transient(index, Tag::Compare);
                }
            }
            Step::Pivot(i) => self.tags.set(i, Tag::Pivot),
            Step::Sorted(i) | Step::Sweep(i) => self.tags.mark_sorted(i),
        }
    }

    fn delay_for(&self, step: Step) -> Duration {
        match step {
            Step::Compare(..) | Step::Swap(..) | Step::Place { .. } | Step::Pivot(_) => self.pacing.step_delay,
            Step::Sweep(_) => self.pacing.sweep_delay,
            Step::Sorted(_) => Duration::ZERO,
        }
    }

    fn render(&mut self) {
        let frame = Frame {
            algorithm: self.algorithm,
            values: &self.sequence,
            tags: self.tags.as_slice(),
            metrics: self.metrics,
            max_value: self.max_value,
        };
        self.sink.render(&frame);
    }
}

fn pause_for(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

/// Long-lived owner of the configuration, the RNG and the receiving end of
/// the command channel. Starts runs one at a time, each with a freshly
/// generated sequence and a fresh playback state.
///
/// The session holds no sender: once every handle returned by `new` is
/// dropped, a paused run is stopped instead of waiting forever.
pub struct Session {
    config: Config,
    rng: StdRng,
    commands: Receiver<Command>,
}

impl Session {
    /// The returned handle pauses, resumes or stops whichever run is active.
    pub fn new(config: Config) -> (Session, PlaybackHandle) {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (handle, commands) = Playback::channel();
        let session = Session {
            config,
            rng,
            commands,
        };
        (session, handle)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.config.algorithm = algorithm;
    }

    /// Generates a new sequence and runs the configured algorithm on it.
    /// Returns only once the run has completed or observed its cancellation.
    pub fn start<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> RunReport {
        let sequence = generate(self.config.size, self.config.max_value, &mut self.rng);
        debug!("Generated sequence: {:?}", sequence);
        let playback = Playback::with_receiver(self.commands.clone());
        Run::new(
            self.config.algorithm,
            sequence,
            self.config.max_value,
            playback,
            self.config.pacing(),
            sink,
        )
        .execute()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SWEEP_DELAY_MS;
    use crate::render::RecordingSink;
    use super::*;

    fn instant_run(algorithm: Algorithm, input: &[u32], sink: &mut RecordingSink) -> RunReport {
        let (playback, _handle) = Playback::new();
        Run::new(algorithm, input.to_vec(), 10, playback, Pacing::instant(), sink).execute()
    }

    #[test]
    fn swap_metric_matches_swap_steps() {
        for algorithm in Algorithm::ALL {
            let mut sink = RecordingSink::new();
            let report = instant_run(algorithm, &[5, 3, 4, 1, 2], &mut sink);
            assert_eq!(report.outcome, Outcome::Completed);
            assert_eq!(report.sequence, vec![1, 2, 3, 4, 5]);

            let mut seq = vec![5, 3, 4, 1, 2];
            let swaps = crate::sorter::steps(algorithm, &mut seq)
                .filter(|s| matches!(s, Step::Swap(..)))
                .count();
            assert_eq!(report.metrics.swaps, swaps as u64, "{}", algorithm);
        }
    }

    #[test]
    fn merge_counts_comparisons_but_not_swaps() {
        let mut sink = RecordingSink::new();
        let report = instant_run(Algorithm::Merge, &[2, 1], &mut sink);
        assert_eq!(report.metrics, Metrics { comparisons: 1, swaps: 0 });
    }

    #[test]
    fn one_frame_per_step_plus_initial() {
        let mut sink = RecordingSink::new();
        let report = instant_run(Algorithm::Bubble, &[3, 1, 2], &mut sink);
        assert_eq!(sink.frames.len(), report.steps + 1);
        assert_eq!(sink.frames[0].values, vec![3, 1, 2]);
        assert!(sink.frames[0].tags.iter().all(|t| *t == Tag::Default));
    }

    #[test]
    fn compare_tags_are_transient() {
        let mut sink = RecordingSink::new();
        instant_run(Algorithm::Bubble, &[1, 2], &mut sink);
        // initial, Compare(0,1), Sorted(1), Sorted(0)
        assert_eq!(sink.frames[1].tags, vec![Tag::Compare, Tag::Compare]);
        assert_eq!(sink.frames[2].tags, vec![Tag::Default, Tag::Sorted]);
        assert_eq!(sink.frames[3].tags, vec![Tag::Sorted, Tag::Sorted]);
    }

    #[test]
    fn pivot_tag_held_during_partition() {
        let mut sink = RecordingSink::new();
        instant_run(Algorithm::Quick, &[3, 1, 2], &mut sink);
        // Pivot(2), Compare(0,2), Compare(1,2), Swap(0,1), Swap(1,2), Sorted(1)
        assert_eq!(sink.frames[1].tags[2], Tag::Pivot);
        assert_eq!(sink.frames[2].tags, vec![Tag::Compare, Tag::Default, Tag::Compare]);
        assert_eq!(sink.frames[4].tags, vec![Tag::Swap, Tag::Swap, Tag::Pivot]);
        // the pivot moves into its slot and is fixed there
        assert_eq!(sink.frames[6].tags, vec![Tag::Default, Tag::Sorted, Tag::Default]);
        let last = sink.frames.last().unwrap();
        assert!(last.tags.iter().all(|t| *t == Tag::Sorted));
    }

    #[test]
    fn stop_before_first_step() {
        let mut sink = RecordingSink::new();
        let (playback, handle) = Playback::new();
        handle.stop();
        let report = Run::new(Algorithm::Heap, vec![5, 3, 4, 1, 2], 10, playback, Pacing::instant(), &mut sink)
            .execute();
        assert_eq!(report.outcome, Outcome::Cancelled);
        assert_eq!(report.steps, 0);
        assert_eq!(report.sequence, vec![5, 3, 4, 1, 2]);
        assert_eq!(report.metrics, Metrics::default());
        assert_eq!(sink.metric_updates, vec![Metrics::default()]);
    }

    /// Stops the run from inside the sink after a number of frames.
    struct StopAfter {
        frames: usize,
        handle: PlaybackHandle,
        inner: RecordingSink,
    }

    impl RenderSink for StopAfter {
        fn render(&mut self, frame: &Frame<'_>) {
            self.inner.render(frame);
            if self.inner.frames.len() == self.frames {
                self.handle.stop();
            }
        }

        fn update_metrics(&mut self, metrics: &Metrics) {
            self.inner.update_metrics(metrics);
        }
    }

    #[test]
    fn stop_mid_run_resets_metrics() {
        let (playback, handle) = Playback::new();
        let mut sink = StopAfter { frames: 6, handle, inner: RecordingSink::new() };
        let report = Run::new(Algorithm::Bubble, vec![5, 4, 3, 2, 1], 10, playback, Pacing::instant(), &mut sink)
            .execute();
        assert_eq!(report.outcome, Outcome::Cancelled);
        // the step whose frame carried the stop is the last one executed
        assert_eq!(report.steps, 5);
        assert!(sink.inner.frames[5].metrics.swaps > 0);
        assert_eq!(report.metrics, Metrics::default());
        assert_eq!(sink.inner.displayed_metrics(), Some(Metrics::default()));
        let mut values = report.sequence.clone();
        values.sort_unstable();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn session_runs_are_independent() {
        let config = Config {
            algorithm: Algorithm::Insertion,
            size: 12,
            max_value: 40,
            speed: 1000,
            seed: Some(12345),
        };
        let (mut session, handle) = Session::new(config);
        let mut sink = RecordingSink::new();
        let first = session.start(&mut sink);
        assert_eq!(first.outcome, Outcome::Completed);
        assert_eq!(first.sequence.len(), 12);

        // a stop issued between runs does not leak into the next one
        handle.stop();
        session.set_algorithm(Algorithm::Quick);
        let second = session.start(&mut sink);
        assert_eq!(second.outcome, Outcome::Completed);
        assert!(second.sequence.windows(2).all(|w| w[0] <= w[1]));
        assert!(second.sequence.iter().all(|v| (1..=40).contains(v)));
    }

    #[test]
    fn empty_run_completes_immediately() {
        let config = Config { size: 0, speed: 1000, seed: Some(1), ..Config::default() };
        let (mut session, _handle) = Session::new(config);
        let mut sink = RecordingSink::new();
        let report = session.start(&mut sink);
        assert_eq!(report.outcome, Outcome::Completed);
        assert_eq!(report.steps, 0);
        assert_eq!(report.metrics, Metrics::default());
        assert!(report.sequence.is_empty());
    }

    #[test]
    fn delay_depends_on_step_kind() {
        let mut sink = RecordingSink::new();
        let (playback, _handle) = Playback::new();
        let run = Run::new(Algorithm::Merge, vec![2, 1], 10, playback, Pacing::from_speed(190), &mut sink);
        let step_delay = Duration::from_millis(10);
        assert_eq!(run.delay_for(Step::Compare(0, 1)), step_delay);
        assert_eq!(run.delay_for(Step::Swap(0, 1)), step_delay);
        assert_eq!(run.delay_for(Step::Place { index: 0, compared: true }), step_delay);
        assert_eq!(run.delay_for(Step::Place { index: 1, compared: false }), step_delay);
        assert_eq!(run.delay_for(Step::Pivot(1)), step_delay);
        // the merge sweep keeps its own pace whatever the speed
        assert_eq!(run.delay_for(Step::Sweep(0)), Duration::from_millis(SWEEP_DELAY_MS));
        assert_eq!(run.delay_for(Step::Sorted(0)), Duration::ZERO);
    }

    /// Pauses at a given frame, then drops the only remaining handle.
    struct PauseAndHangUp {
        frame: usize,
        handle: Option<PlaybackHandle>,
        frames: usize,
    }

    impl RenderSink for PauseAndHangUp {
        fn render(&mut self, _frame: &Frame<'_>) {
            self.frames += 1;
            if self.frames == self.frame {
                if let Some(handle) = self.handle.take() {
                    handle.pause();
                }
            }
        }
    }

    #[test]
    fn paused_session_stops_when_input_closes() {
        let config = Config { algorithm: Algorithm::Bubble, size: 16, speed: 1000, seed: Some(12345), ..Config::default() };
        let (mut session, handle) = Session::new(config);
        let (tx, rx) = crossbeam_channel::bounded(1);
        thread::spawn(move || {
            let mut sink = PauseAndHangUp { frame: 4, handle: Some(handle), frames: 0 };
            let report = session.start(&mut sink);
            let _ = tx.send((report, sink.frames));
        });

        let (report, frames) = rx.recv_timeout(Duration::from_secs(3)).expect("paused run never returned");
        assert_eq!(report.outcome, Outcome::Cancelled);
        assert_eq!(report.steps, 3);
        assert_eq!(frames, 4);
        assert_eq!(report.metrics, Metrics::default());
    }
}
