use nalgebra::Vector3;
use serde::Serialize;

use crate::config::SimulationConfig;
use crate::control::{
    Arbitration, AutoPilot, Axis, ControlCommand, PilotInput, TickReport, VehicleStatus,
};
use crate::error::DamperError;
use crate::sim::{DisturbanceModel, PilotScript};

#[derive(Debug, Clone, Serialize)]
pub struct TickTelemetry {
    pub time: f64,
    pub angular_velocity: Vector3<f64>,
    pub landed: bool,
    pub input: PilotInput,
    pub command: ControlCommand,
    /// Raw (unclamped) damper outputs per axis, zero where no damper is attached.
    pub outputs: [f64; 3],
    pub decisions: TickReport,
}

/// Replays a disturbance signal and a pilot script through an autopilot.
///
/// There is no vehicle dynamics here: the rate signal is open loop, so the log shows
/// what the dampers command and when they yield, not how the vehicle responds.
pub struct Simulator {
    pub autopilot: AutoPilot,
    pub disturbances: DisturbanceModel,
    pub script: PilotScript,
    pub config: SimulationConfig,
    pub time: f64,
    pub running: bool,
    pub telemetry_log: Vec<TickTelemetry>,
    ticks: usize,
    last_print: f64,
}

impl Simulator {
    pub fn new(autopilot: AutoPilot, script: PilotScript, config: SimulationConfig) -> Self {
        Self {
            autopilot,
            disturbances: DisturbanceModel::from_config(&config),
            script,
            config,
            time: 0.0,
            running: false,
            telemetry_log: Vec::new(),
            ticks: 0,
            last_print: f64::NEG_INFINITY,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
        self.time = 0.0;
        self.ticks = 0;
        self.last_print = f64::NEG_INFINITY;
        self.telemetry_log.clear();

        log::info!(
            "simulation started: dt={} max_time={} dampers={}",
            self.config.dt,
            self.config.max_time,
            self.autopilot.dampers().count()
        );
    }

    pub fn step(&mut self) -> bool {
        if !self.running || self.ticks >= self.config.steps() {
            return false;
        }

        let (input, landed) = self.script.sample(self.time);
        self.disturbances.update(self.config.dt);
        let status = VehicleStatus::new(self.disturbances.angular_velocity(), landed);

        let command = self.autopilot.tick(&status, &input, self.config.dt);
        // Derived from the tick count so long runs don't accumulate rounding drift.
        self.ticks += 1;
        self.time = self.ticks as f64 * self.config.dt;

        let outputs = Axis::ALL.map(|axis| self.autopilot.damper(axis).map_or(0.0, |d| d.output()));

        let telemetry = TickTelemetry {
            time: self.time,
            angular_velocity: status.angular_velocity,
            landed,
            input,
            command,
            outputs,
            decisions: *self.autopilot.last_report(),
        };

        let interval = self.config.print_interval;
        if interval > 0.0 && self.time - self.last_print >= interval {
            self.last_print = self.time;
            self.print_status(&telemetry);
        }
        self.telemetry_log.push(telemetry);

        true
    }

    pub fn run(&mut self) {
        self.start();

        while self.step() {}

        self.finish();
    }

    pub fn finish(&mut self) {
        self.running = false;

        println!("\nSimulation completed");
        println!("Total time: {:.2} s", self.time);
        println!("Total telemetry points: {}", self.telemetry_log.len());

        let summary = self.summary();
        println!("Ticks applied (y/p/r): {:?}", summary.applied);
        println!("Peak |command| (y/p/r): {:.3?}", summary.peak_command);
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for tick in &self.telemetry_log {
            let commands = [tick.command.yaw, tick.command.pitch, tick.command.roll];
            for (i, axis) in Axis::ALL.into_iter().enumerate() {
                if tick.decisions.get(axis) == Some(Arbitration::Applied) {
                    summary.applied[i] += 1;
                }
                summary.peak_command[i] = summary.peak_command[i].max(commands[i].abs());
            }
        }
        summary
    }

    fn print_status(&self, telemetry: &TickTelemetry) {
        let report = &telemetry.decisions;
        let w = telemetry.angular_velocity;
        println!(
            "t={:6.2}s | w=({:+.3},{:+.3},{:+.3}) rad/s | cmd y={:+.3} p={:+.3} r={:+.3}{}",
            telemetry.time,
            w.x,
            w.y,
            w.z,
            telemetry.command.yaw,
            telemetry.command.pitch,
            telemetry.command.roll,
            if telemetry.landed { " | landed" } else { "" }
        );
        println!(
            "         | yaw={:?} pitch={:?} roll={:?}",
            report.yaw, report.pitch, report.roll
        );
    }

    pub fn export_telemetry(&self, filename: &str) -> Result<(), DamperError> {
        use std::fs::File;
        use std::io::{BufWriter, Write};

        let mut file = BufWriter::new(File::create(filename)?);
        writeln!(
            file,
            "{}",
            concat!(
                "time,wx,wy,wz,landed,kill_rot,",
                "yaw_in,pitch_in,roll_in,",
                "yaw_cmd,pitch_cmd,roll_cmd,",
                "yaw_out,pitch_out,roll_out"
            )
        )?;

        for t in &self.telemetry_log {
            writeln!(
                file,
                "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
                t.time,
                t.angular_velocity.x,
                t.angular_velocity.y,
                t.angular_velocity.z,
                t.landed as u8,
                t.input.kill_rot as u8,
                t.input.yaw,
                t.input.pitch,
                t.input.roll,
                t.command.yaw,
                t.command.pitch,
                t.command.roll,
                t.outputs[0],
                t.outputs[1],
                t.outputs[2]
            )?;
        }
        file.flush()?;

        log::info!("telemetry exported to {}", filename);
        Ok(())
    }
}

/// Per-axis totals over a run, indexed yaw, pitch, roll.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    /// Ticks where the damper's output was written to the command.
    pub applied: [usize; 3],
    pub peak_command: [f64; 3],
}
