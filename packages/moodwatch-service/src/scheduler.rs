use std::{
	any::Any,
	panic::{self, AssertUnwindSafe},
	sync::{Arc, Mutex, MutexGuard},
	time::Duration,
};

use tokio::{
	runtime::Handle,
	sync::watch,
	task::JoinHandle,
	time::{self as tokio_time, Instant, MissedTickBehavior},
};

use crate::{
	Error, Result,
	accumulator::Accumulator,
	engine::Generation,
	presenter::{self, Presenter},
};
use moodwatch_config::Schedule;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Trigger {
	/// Checks whether the window is due and, if so, generates and shows a fresh summary.
	Generation,
	/// Re-shows the current summary with its age.
	Display,
}
impl Trigger {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Generation => "generation",
			Self::Display => "display",
		}
	}
}

struct Armed {
	shutdown: watch::Sender<bool>,
	handle: JoinHandle<()>,
}

#[derive(Default)]
struct Slots {
	generation: Option<Armed>,
	display: Option<Armed>,
}
impl Slots {
	fn get_mut(&mut self, trigger: Trigger) -> &mut Option<Armed> {
		match trigger {
			Trigger::Generation => &mut self.generation,
			Trigger::Display => &mut self.display,
		}
	}
}

struct Ticks {
	accumulator: Arc<Accumulator>,
	presenter: Arc<dyn Presenter>,
}
impl Ticks {
	/// Runs one tick, logging any error or panic instead of letting it escape the loop.
	fn run(&self, trigger: Trigger) {
		let outcome = panic::catch_unwind(AssertUnwindSafe(|| match trigger {
			Trigger::Generation => self.generation_tick(),
			Trigger::Display => self.display_tick(),
		}));

		match outcome {
			Ok(Ok(())) => {},
			Ok(Err(err)) => {
				tracing::error!(trigger = trigger.as_str(), error = %err, "Scheduled tick failed.");
			},
			Err(payload) => {
				tracing::error!(
					trigger = trigger.as_str(),
					panic = panic_message(payload.as_ref()),
					"Scheduled tick panicked."
				);
			},
		}
	}

	fn generation_tick(&self) -> Result<()> {
		let Some(generation) = self.accumulator.generate_if_due() else {
			return Ok(());
		};

		if let Generation::NoData = generation {
			tracing::debug!("Window is due but empty.");
		}

		self.presenter.render(&presenter::frame(generation.text()))
	}

	fn display_tick(&self) -> Result<()> {
		self.presenter.render(&presenter::frame(&self.accumulator.current_summary_text()))
	}
}

/// Owns the two periodic triggers. Dropping the scheduler disarms both.
pub struct Scheduler {
	ticks: Arc<Ticks>,
	generation_period: Duration,
	display_period: Duration,
	slots: Mutex<Slots>,
}
impl Scheduler {
	pub fn new(
		accumulator: Arc<Accumulator>,
		presenter: Arc<dyn Presenter>,
		schedule: &Schedule,
	) -> Self {
		Self {
			ticks: Arc::new(Ticks { accumulator, presenter }),
			generation_period: Duration::from_millis(schedule.generation_check_interval_ms),
			display_period: Duration::from_millis(schedule.display_refresh_interval_ms),
			slots: Mutex::new(Slots::default()),
		}
	}

	/// Arms both triggers. Triggers that are already armed are left running.
	///
	/// Both triggers are checked before either is spawned, so a failed start arms nothing.
	pub fn start(&self) -> Result<()> {
		self.preflight(Trigger::Generation)?;
		self.preflight(Trigger::Display)?;
		self.arm(Trigger::Generation)?;
		self.arm(Trigger::Display)
	}

	/// Disarms both triggers and waits for any in-flight tick to finish.
	pub async fn stop(&self) {
		self.disarm(Trigger::Generation).await;
		self.disarm(Trigger::Display).await;
	}

	pub fn arm(&self, trigger: Trigger) -> Result<()> {
		let (period, runtime) = self.preflight(trigger)?;
		let mut slots = self.lock();
		let slot = slots.get_mut(trigger);

		if slot.as_ref().map(|armed| !armed.handle.is_finished()).unwrap_or(false) {
			return Ok(());
		}

		let (shutdown, signal) = watch::channel(false);
		let handle = runtime.spawn(run_trigger(trigger, period, Arc::clone(&self.ticks), signal));

		*slot = Some(Armed { shutdown, handle });

		tracing::info!(
			trigger = trigger.as_str(),
			period_ms = period.as_millis() as u64,
			"Trigger armed."
		);

		Ok(())
	}

	pub async fn disarm(&self, trigger: Trigger) {
		let Some(armed) = self.lock().get_mut(trigger).take() else {
			return;
		};

		let _ = armed.shutdown.send(true);

		if let Err(err) = armed.handle.await {
			tracing::error!(trigger = trigger.as_str(), error = %err, "Trigger task ended abnormally.");
		}

		tracing::info!(trigger = trigger.as_str(), "Trigger disarmed.");
	}

	pub fn is_armed(&self, trigger: Trigger) -> bool {
		self.lock()
			.get_mut(trigger)
			.as_ref()
			.map(|armed| !armed.handle.is_finished())
			.unwrap_or(false)
	}

	/// Runs one display tick right away, outside the regular cadence.
	pub fn refresh_display(&self) {
		self.ticks.run(Trigger::Display);
	}

	fn preflight(&self, trigger: Trigger) -> Result<(Duration, Handle)> {
		let period = self.period(trigger);

		if period.is_zero() {
			return Err(Error::Scheduler {
				message: format!("The {} period must be greater than zero.", trigger.as_str()),
			});
		}

		let runtime = Handle::try_current().map_err(|err| Error::Scheduler {
			message: format!("Cannot arm the {} trigger without a runtime: {err}.", trigger.as_str()),
		})?;

		Ok((period, runtime))
	}

	fn period(&self, trigger: Trigger) -> Duration {
		match trigger {
			Trigger::Generation => self.generation_period,
			Trigger::Display => self.display_period,
		}
	}

	fn lock(&self) -> MutexGuard<'_, Slots> {
		self.slots.lock().unwrap_or_else(|err| err.into_inner())
	}
}

async fn run_trigger(
	trigger: Trigger,
	period: Duration,
	ticks: Arc<Ticks>,
	mut shutdown: watch::Receiver<bool>,
) {
	let mut interval = tokio_time::interval_at(Instant::now() + period, period);

	interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

	loop {
		tokio::select! {
			biased;

			changed = shutdown.changed() => {
				if changed.is_err() || *shutdown.borrow() {
					break;
				}
			},
			_ = interval.tick() => ticks.run(trigger),
		}
	}

	tracing::debug!(trigger = trigger.as_str(), "Trigger loop exited.");
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
	if let Some(message) = payload.downcast_ref::<&'static str>() {
		message
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.as_str()
	} else {
		"unknown panic payload"
	}
}
