//! Cycle-accurate interpreter for the `noop`/`addx` CRT device.
//!
//! A [`Program`](program::Program) is decoded from text, executed by the
//! [`Processor`](processor::Processor), and every elapsed cycle is reported to
//! a [`CycleObserver`](processor::CycleObserver) such as the
//! [`SignalAccumulator`](signal::SignalAccumulator) or the
//! [`RasterRenderer`](raster::RasterRenderer).

pub mod processor;
pub mod program;
pub mod raster;
pub mod signal;
