//! Actuator sequencer
//!
//! Turns phase commands into regulator setpoints and valve switching.
//!
//! Interlock: the pressure (systole) valve and the vacuum (diastole) valve
//! are never open at the same time. Every transition closes the outgoing
//! valve before opening the incoming one, and a failure anywhere in that
//! sequence drops into the safe state instead of continuing.
//!
//! Safe state: systole valve closed, diastole valve open. The device vents
//! rather than holds pressure. It is entered unconditionally and never
//! retried; the next command is the only way out. If the systole valve
//! does not confirm closing, the diastole valve is left untouched.

use super::PhaseCommand;
use crate::config::SystemConfig;
use crate::traits::{PeriphError, PressureRegulator, SolenoidValve};

/// Current actuation configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerState {
    /// No command applied yet
    #[default]
    Boot,
    /// Regulator at systole setpoint, pressure valve open
    Systole,
    /// Regulator at diastole setpoint, vacuum valve open
    Diastole,
    /// Pressure valve closed, vacuum valve open
    SafeState,
}

/// Why the safe state was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SafeStateCause {
    /// The regulator refused the setpoint
    RegulatorRejected(PeriphError),
    /// A valve failed to switch during a transition
    ValveFault(PeriphError),
    /// Requested explicitly (e.g. at boot)
    Requested,
}

/// Record of one safe-state entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SafeStateEntry {
    /// What triggered it
    pub cause: SafeStateCause,
    /// First valve failure while venting, if any
    pub valves: Result<(), PeriphError>,
}

/// Outcome of applying one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Actuation {
    /// Systole configuration reached
    Systole,
    /// Diastole configuration reached
    Diastole,
    /// Transition aborted, device vented
    SafeState(SafeStateEntry),
}

/// Command-driven regulator and valve sequencer
pub struct ActuatorSequencer<R, S, D> {
    regulator: R,
    systole_valve: S,
    diastole_valve: D,
    state: SequencerState,
    safe_state_entries: u32,
}

impl<R, S, D> ActuatorSequencer<R, S, D>
where
    R: PressureRegulator,
    S: SolenoidValve,
    D: SolenoidValve,
{
    /// Create a sequencer
    ///
    /// No hardware is touched until the first command or [`Self::safe_state`].
    pub fn new(regulator: R, systole_valve: S, diastole_valve: D) -> Self {
        Self {
            regulator,
            systole_valve,
            diastole_valve,
            state: SequencerState::Boot,
            safe_state_entries: 0,
        }
    }

    /// Apply one phase command using the setpoints in `config`
    pub fn apply(&mut self, command: PhaseCommand, config: &SystemConfig) -> Actuation {
        match command {
            PhaseCommand::SystoleStart => self.start_systole(config.systole_pressure_bar),
            PhaseCommand::DiastoleStart => self.start_diastole(config.diastole_pressure_bar),
        }
    }

    /// Vent the device on request
    pub fn safe_state(&mut self) -> Actuation {
        self.enter_safe_state(SafeStateCause::Requested)
    }

    fn start_systole(&mut self, bar: f32) -> Actuation {
        if let Err(e) = self.regulator.set_target_pressure(bar) {
            return self.enter_safe_state(SafeStateCause::RegulatorRejected(e));
        }

        // Close vacuum before opening pressure
        if let Err(e) = self.diastole_valve.deactivate() {
            return self.enter_safe_state(SafeStateCause::ValveFault(e));
        }
        if let Err(e) = self.systole_valve.activate() {
            return self.enter_safe_state(SafeStateCause::ValveFault(e));
        }

        self.state = SequencerState::Systole;
        Actuation::Systole
    }

    fn start_diastole(&mut self, bar: f32) -> Actuation {
        if let Err(e) = self.regulator.set_target_pressure(bar) {
            return self.enter_safe_state(SafeStateCause::RegulatorRejected(e));
        }

        // Close pressure before opening vacuum
        if let Err(e) = self.systole_valve.deactivate() {
            return self.enter_safe_state(SafeStateCause::ValveFault(e));
        }
        if let Err(e) = self.diastole_valve.activate() {
            return self.enter_safe_state(SafeStateCause::ValveFault(e));
        }

        self.state = SequencerState::Diastole;
        Actuation::Diastole
    }

    fn enter_safe_state(&mut self, cause: SafeStateCause) -> Actuation {
        // Venting through a pressure path that failed to close would open both
        let valves = self
            .systole_valve
            .deactivate()
            .and_then(|()| self.diastole_valve.activate());

        self.state = SequencerState::SafeState;
        self.safe_state_entries = self.safe_state_entries.saturating_add(1);

        Actuation::SafeState(SafeStateEntry {
            cause,
            valves,
        })
    }

    /// Current actuation state
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Number of times the safe state has been entered
    pub fn safe_state_entries(&self) -> u32 {
        self.safe_state_entries
    }

    /// Get access to the regulator
    pub fn regulator(&self) -> &R {
        &self.regulator
    }

    /// Get mutable access to the regulator
    pub fn regulator_mut(&mut self) -> &mut R {
        &mut self.regulator
    }

    /// Get access to the systole (pressure) valve
    pub fn systole_valve(&self) -> &S {
        &self.systole_valve
    }

    /// Get access to the diastole (vacuum) valve
    pub fn diastole_valve(&self) -> &D {
        &self.diastole_valve
    }

    /// Get mutable access to the systole (pressure) valve
    pub fn systole_valve_mut(&mut self) -> &mut S {
        &mut self.systole_valve
    }

    /// Get mutable access to the diastole (vacuum) valve
    pub fn diastole_valve_mut(&mut self) -> &mut D {
        &mut self.diastole_valve
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Valve {
        Systole,
        Diastole,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        SetPressure(f32),
        Activate(Valve),
        Deactivate(Valve),
        /// Deactivate attempted but the valve stayed as it was
        Stuck(Valve),
    }

    type Trace = RefCell<heapless::Vec<Call, 256>>;

    fn record(trace: &Trace, call: Call) {
        trace.borrow_mut().push(call).unwrap();
    }

    struct FakeRegulator<'a> {
        trace: &'a Trace,
        reject: Option<PeriphError>,
    }

    impl PressureRegulator for FakeRegulator<'_> {
        fn set_target_pressure(&mut self, bar: f32) -> Result<(), PeriphError> {
            record(self.trace, Call::SetPressure(bar));
            match self.reject {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }

        fn actual_pressure(&mut self) -> Result<f32, PeriphError> {
            Ok(0.0)
        }
    }

    struct FakeValve<'a> {
        id: Valve,
        trace: &'a Trace,
        active: bool,
        fail_deactivate: Option<PeriphError>,
    }

    impl<'a> FakeValve<'a> {
        fn new(id: Valve, trace: &'a Trace) -> Self {
            Self {
                id,
                trace,
                active: false,
                fail_deactivate: None,
            }
        }
    }

    impl SolenoidValve for FakeValve<'_> {
        fn activate(&mut self) -> Result<(), PeriphError> {
            record(self.trace, Call::Activate(self.id));
            self.active = true;
            Ok(())
        }

        fn deactivate(&mut self) -> Result<(), PeriphError> {
            if let Some(e) = self.fail_deactivate {
                record(self.trace, Call::Stuck(self.id));
                return Err(e);
            }
            record(self.trace, Call::Deactivate(self.id));
            self.active = false;
            Ok(())
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    type TestSequencer<'a> = ActuatorSequencer<FakeRegulator<'a>, FakeValve<'a>, FakeValve<'a>>;

    fn sequencer(trace: &Trace) -> TestSequencer<'_> {
        ActuatorSequencer::new(
            FakeRegulator {
                trace,
                reject: None,
            },
            FakeValve::new(Valve::Systole, trace),
            FakeValve::new(Valve::Diastole, trace),
        )
    }

    /// Replay the trace and check that no prefix leaves both valves open
    fn interlock_holds(calls: &[Call]) -> bool {
        let (mut systole, mut diastole) = (false, false);
        for call in calls {
            match call {
                Call::Activate(Valve::Systole) => systole = true,
                Call::Activate(Valve::Diastole) => diastole = true,
                Call::Deactivate(Valve::Systole) => systole = false,
                Call::Deactivate(Valve::Diastole) => diastole = false,
                Call::SetPressure(_) | Call::Stuck(_) => {}
            }
            if systole && diastole {
                return false;
            }
        }
        true
    }

    #[test]
    fn test_nominal_cycle_call_order() {
        let trace = Trace::default();
        let mut seq = sequencer(&trace);
        let config = SystemConfig::DEFAULT;

        assert_eq!(
            seq.apply(PhaseCommand::SystoleStart, &config),
            Actuation::Systole
        );
        assert_eq!(seq.state(), SequencerState::Systole);
        assert_eq!(
            trace.borrow().as_slice(),
            &[
                Call::SetPressure(1.2),
                Call::Deactivate(Valve::Diastole),
                Call::Activate(Valve::Systole),
            ]
        );

        trace.borrow_mut().clear();
        assert_eq!(
            seq.apply(PhaseCommand::DiastoleStart, &config),
            Actuation::Diastole
        );
        assert_eq!(seq.state(), SequencerState::Diastole);
        assert_eq!(
            trace.borrow().as_slice(),
            &[
                Call::SetPressure(0.05),
                Call::Deactivate(Valve::Systole),
                Call::Activate(Valve::Diastole),
            ]
        );
        assert!(!seq.systole_valve().is_active());
        assert!(seq.diastole_valve().is_active());
    }

    #[test]
    fn test_regulator_rejection_enters_safe_state() {
        let trace = Trace::default();
        let mut seq = sequencer(&trace);
        seq.regulator_mut().reject = Some(PeriphError::Hal);

        let outcome = seq.apply(PhaseCommand::SystoleStart, &SystemConfig::DEFAULT);

        assert_eq!(
            outcome,
            Actuation::SafeState(SafeStateEntry {
                cause: SafeStateCause::RegulatorRejected(PeriphError::Hal),
                valves: Ok(()),
            })
        );
        assert_eq!(seq.state(), SequencerState::SafeState);
        assert_eq!(seq.safe_state_entries(), 1);
        assert_eq!(
            &trace.borrow()[1..],
            &[
                Call::Deactivate(Valve::Systole),
                Call::Activate(Valve::Diastole),
            ]
        );
        assert!(!trace
            .borrow()
            .iter()
            .any(|c| *c == Call::Activate(Valve::Systole)));
    }

    #[test]
    fn test_diastole_rejection_uses_same_safe_sequence() {
        let trace = Trace::default();
        let mut seq = sequencer(&trace);
        seq.regulator_mut().reject = Some(PeriphError::Timeout);

        seq.apply(PhaseCommand::DiastoleStart, &SystemConfig::DEFAULT);

        assert_eq!(
            trace.borrow().as_slice(),
            &[
                Call::SetPressure(0.05),
                Call::Deactivate(Valve::Systole),
                Call::Activate(Valve::Diastole),
            ]
        );
    }

    #[test]
    fn test_stuck_vacuum_valve_blocks_systole() {
        let trace = Trace::default();
        let mut seq = sequencer(&trace);
        seq.apply(PhaseCommand::DiastoleStart, &SystemConfig::DEFAULT);
        seq.diastole_valve_mut().fail_deactivate = Some(PeriphError::Hal);
        trace.borrow_mut().clear();

        let outcome = seq.apply(PhaseCommand::SystoleStart, &SystemConfig::DEFAULT);

        assert!(matches!(
            outcome,
            Actuation::SafeState(SafeStateEntry {
                cause: SafeStateCause::ValveFault(PeriphError::Hal),
                ..
            })
        ));
        assert!(!trace
            .borrow()
            .iter()
            .any(|c| *c == Call::Activate(Valve::Systole)));
        assert!(interlock_holds(&trace.borrow()));
    }

    #[test]
    fn test_safe_state_reports_valve_failure() {
        let trace = Trace::default();
        let mut seq = sequencer(&trace);
        seq.systole_valve_mut().fail_deactivate = Some(PeriphError::NullHandle);

        let outcome = seq.safe_state();

        assert_eq!(
            outcome,
            Actuation::SafeState(SafeStateEntry {
                cause: SafeStateCause::Requested,
                valves: Err(PeriphError::NullHandle),
            })
        );
        assert_eq!(seq.state(), SequencerState::SafeState);
        assert!(!seq.diastole_valve().is_active());
    }

    #[test]
    fn test_stuck_pressure_valve_keeps_vacuum_closed() {
        let trace = Trace::default();
        let mut seq = sequencer(&trace);
        seq.apply(PhaseCommand::SystoleStart, &SystemConfig::DEFAULT);
        assert!(seq.systole_valve().is_active());

        seq.systole_valve_mut().fail_deactivate = Some(PeriphError::Hal);
        seq.regulator_mut().reject = Some(PeriphError::Timeout);
        let mark = trace.borrow().len();

        let outcome = seq.apply(PhaseCommand::DiastoleStart, &SystemConfig::DEFAULT);

        assert_eq!(
            outcome,
            Actuation::SafeState(SafeStateEntry {
                cause: SafeStateCause::RegulatorRejected(PeriphError::Timeout),
                valves: Err(PeriphError::Hal),
            })
        );
        let calls = trace.borrow();
        assert_eq!(
            &calls[mark..],
            &[Call::SetPressure(0.05), Call::Stuck(Valve::Systole)]
        );
        assert!(!calls[mark..].contains(&Call::Activate(Valve::Diastole)));
        assert!(interlock_holds(&calls));
        assert!(!seq.diastole_valve().is_active());
    }

    #[test]
    fn test_stuck_pressure_valve_blocks_diastole() {
        let trace = Trace::default();
        let mut seq = sequencer(&trace);
        seq.apply(PhaseCommand::SystoleStart, &SystemConfig::DEFAULT);
        seq.systole_valve_mut().fail_deactivate = Some(PeriphError::Hal);

        let outcome = seq.apply(PhaseCommand::DiastoleStart, &SystemConfig::DEFAULT);

        assert!(matches!(
            outcome,
            Actuation::SafeState(SafeStateEntry {
                cause: SafeStateCause::ValveFault(PeriphError::Hal),
                valves: Err(PeriphError::Hal),
            })
        ));
        assert!(seq.systole_valve().is_active());
        assert!(!seq.diastole_valve().is_active());
        assert!(interlock_holds(&trace.borrow()));
    }

    #[test]
    fn test_recovers_after_safe_state() {
        let trace = Trace::default();
        let mut seq = sequencer(&trace);
        seq.regulator_mut().reject = Some(PeriphError::OutOfRange);
        seq.apply(PhaseCommand::SystoleStart, &SystemConfig::DEFAULT);

        seq.regulator_mut().reject = None;
        assert_eq!(
            seq.apply(PhaseCommand::SystoleStart, &SystemConfig::DEFAULT),
            Actuation::Systole
        );
        assert!(seq.systole_valve().is_active());
        assert!(!seq.diastole_valve().is_active());
    }

    proptest! {
        #[test]
        fn prop_valves_never_both_open(
            steps in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..60)
        ) {
            let trace = Trace::default();
            let mut seq = sequencer(&trace);
            let config = SystemConfig::DEFAULT;

            for (systole, reject) in steps {
                seq.regulator_mut().reject = reject.then_some(PeriphError::Hal);
                let command = if systole {
                    PhaseCommand::SystoleStart
                } else {
                    PhaseCommand::DiastoleStart
                };

                let mark = trace.borrow().len();
                let outcome = seq.apply(command, &config);

                if reject {
                    let calls = trace.borrow();
                    prop_assert_eq!(
                        &calls[mark + 1..],
                        &[Call::Deactivate(Valve::Systole), Call::Activate(Valve::Diastole)][..]
                    );
                    let is_safe = matches!(outcome, Actuation::SafeState(_));
                    prop_assert!(is_safe);
                }
                prop_assert!(!(seq.systole_valve().is_active() && seq.diastole_valve().is_active()));
            }

            prop_assert!(interlock_holds(&trace.borrow()));
        }
    }
}
