use std::fmt;

use log::*;

pub type Register = i32; // value of X
pub type Cycle = u32; // 1-based cycle number

/// Value of X before the first instruction
pub const INITIAL_REGISTER: Register = 1;
/// Number of the first cycle
pub const FIRST_CYCLE: Cycle = 1;

/// Receives the state of the device once per elapsed cycle
pub trait CycleObserver {
    /// Called while `cycle` is in progress. `x` is the value X holds for the
    /// whole of that cycle.
    fn observe(&mut self, cycle: Cycle, x: Register);
}

impl<T: CycleObserver + ?Sized> CycleObserver for &mut T {
    fn observe(&mut self, cycle: Cycle, x: Register) {
        (**self).observe(cycle, x);
    }
}

/// Fans out to both observers, first `A` then `B`
impl<A: CycleObserver, B: CycleObserver> CycleObserver for (A, B) {
    fn observe(&mut self, cycle: Cycle, x: Register) {
        self.0.observe(cycle, x);
        self.1.observe(cycle, x);
    }
}

/// Records every observation as a trace
impl CycleObserver for Vec<(Cycle, Register)> {
    fn observe(&mut self, cycle: Cycle, x: Register) {
        self.push((cycle, x));
    }
}

/// Emulates the CPU of the device
///
/// The only state is the X register and the number of the cycle that is about
/// to begin. Observers always see X as it stood during the observed cycle:
/// an `addx` writes its result only after both of its cycles were reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Processor {
    /// The X register
    pub x: Register,
    /// The cycle that begins next
    pub cycle: Cycle,
}

impl Default for Processor {
    /// Initializes a new CPU
    fn default() -> Self {
        Self::new()
    }
}

impl Processor {
    /// Initializes a new CPU with X = 1 at cycle 1
    pub fn new() -> Self {
        Self {
            x: INITIAL_REGISTER,
            cycle: FIRST_CYCLE,
        }
    }

    /// Lets one cycle elapse
    fn tick<O: CycleObserver + ?Sized>(&mut self, observer: &mut O) {
        observer.observe(self.cycle, self.x);
        self.cycle += 1;
    }

    /// Executes a single instruction and returns the number of elapsed cycles
    ///
    /// `observer` is called once for each cycle the instruction takes. The
    /// register write of `addx` happens after the last of those calls, so the
    /// new value is first observed in the cycle after the instruction.
    pub fn execute_instruction<O: CycleObserver + ?Sized>(
        &mut self,
        instruction: Instruction,
        observer: &mut O,
    ) -> Cycle {
        let cycles = instruction.cycles();
        for _ in 0..cycles {
            self.tick(observer);
        }

        match instruction {
            Instruction::Noop => {
                debug!("noop");
            }
            Instruction::AddX(delta) => {
                let result = self.x.wrapping_add(delta);
                debug!("addx {}: {} -> {}", delta, self.x, result);
                self.x = result;
            }
        }

        cycles
    }

    /// Executes every instruction in order and returns the number of elapsed
    /// cycles
    ///
    /// No observation is made after the last instruction, see
    /// [`Processor::settle`].
    pub fn execute_program<I, O>(&mut self, program: I, observer: &mut O) -> Cycle
    where
        I: IntoIterator<Item = Instruction>,
        O: CycleObserver + ?Sized,
    {
        let start = self.cycle;

        for instruction in program {
            self.execute_instruction(instruction, observer);
        }

        let elapsed = self.cycle - start;
        info!(
            "Program finished after {} cycles. X: {}",
            elapsed, self.x
        );

        elapsed
    }

    /// Reports the current state once more without letting a cycle elapse
    ///
    /// Used after [`Processor::execute_program`] to sample the cycle that
    /// would begin next, with the final value of X.
    pub fn settle<O: CycleObserver + ?Sized>(&self, observer: &mut O) {
        observer.observe(self.cycle, self.x);
    }
}

macro_rules! mnemonics {
    ( $( $( #[doc = $doc:expr] )+ $name:ident = $text:literal , )+ ) => {
        /// Names of the instructions as they appear in a program
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Mnemonic {
            $(
                $( #[doc = $doc] )+
                $name,
            )+
        }

        impl Mnemonic {
            pub const ALL: &'static [Self] = &[
                $( Self::$name , )+
            ];

            pub fn name(&self) -> &'static str {
                match self {
                    $( Self::$name => $text , )+
                }
            }
        }

        impl fmt::Display for Mnemonic {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    }
}

mnemonics! {
    /// No operation
    Noop = "noop",
    /// Add a signed constant to X
    AddX = "addx",
}

/// A decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Does nothing for one cycle
    Noop,
    /// Adds a signed constant to X after two cycles
    /// @param delta The value to add
    AddX(Register),
}

impl Instruction {
    pub fn mnemonic(&self) -> Mnemonic {
        match self {
            Instruction::Noop => Mnemonic::Noop,
            Instruction::AddX(_) => Mnemonic::AddX,
        }
    }

    /// Number of cycles the instruction takes to complete
    pub const fn cycles(&self) -> Cycle {
        match self {
            Instruction::Noop => 1,
            Instruction::AddX(_) => 2,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Noop => f.write_str(Mnemonic::Noop.name()),
            Instruction::AddX(delta) => write!(f, "{} {}", Mnemonic::AddX, delta),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    type Trace = Vec<(Cycle, Register)>;

    fn instruction() -> impl Strategy<Value = Instruction> {
        prop_oneof![
            Just(Instruction::Noop),
            (-50i32..50).prop_map(Instruction::AddX),
        ]
    }

    proptest! {
        #[test]
        fn observer_called_once_per_cycle(program in prop::collection::vec(instruction(), 0..200)) {
            let mut cpu = Processor::default();
            let mut trace = Trace::new();
            let expected: Cycle = program.iter().map(Instruction::cycles).sum();

            let elapsed = cpu.execute_program(program, &mut trace);

            prop_assert_eq!(elapsed, expected);
            prop_assert_eq!(trace.len() as Cycle, expected);
            for (index, (cycle, _)) in trace.iter().enumerate() {
                prop_assert_eq!(*cycle, index as Cycle + FIRST_CYCLE);
            }
        }

        #[test]
        fn noop_keeps_register(x in -1000i32..1000, cycle in 1u32..10_000) {
            let mut cpu = Processor { x, cycle };

            cpu.execute_instruction(Instruction::Noop, &mut Trace::new());

            prop_assert_eq!(cpu, Processor { x, cycle: cycle + 1 });
        }

        #[test]
        fn add_x_observes_old_value(x in -1000i32..1000, delta in -1000i32..1000) {
            let mut cpu = Processor { x, cycle: FIRST_CYCLE };
            let mut trace = Trace::new();

            cpu.execute_instruction(Instruction::AddX(delta), &mut trace);

            prop_assert_eq!(trace, vec![(1, x), (2, x)]);
            prop_assert_eq!(cpu.x, x + delta);
        }
    }
}
