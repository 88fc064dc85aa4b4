use rate_damper::config::SimulationConfig;
use rate_damper::control::AutoPilot;
use rate_damper::inspector::{InspectorSession, Window};
use rate_damper::sim::{PilotScript, Simulator};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let scenario = args
        .iter()
        .skip(1)
        .find(|a| !a.starts_with("--"))
        .map(String::as_str)
        .unwrap_or("gust");

    let (script, sim_config) = match scenario {
        "landing" => (PilotScript::landing(), SimulationConfig::landing_test()),
        "handoff" => (PilotScript::handoff(), SimulationConfig::pilot_handoff_test()),
        _ => (PilotScript::gust(), SimulationConfig::gust_test()),
    };

    println!("Angular rate damper");
    println!("Scenario: {scenario}");
    println!();

    let mut simulator = Simulator::new(AutoPilot::all_axes(), script, sim_config);

    simulator.run();

    if let Err(e) = simulator.export_telemetry("damper_telemetry.csv") {
        eprintln!("Failed to export telemetry: {}", e);
    }

    if args.iter().any(|a| a == "--panel") {
        let mut session = InspectorSession::new(Window::new("Autopilot", 0));
        session.window_mut().show();
        for line in session.render(&simulator.autopilot) {
            println!("{line}");
        }
        for damper in simulator.autopilot.dampers() {
            println!("-- {}", damper.name());
            for line in session.render(damper) {
                println!("  {line}");
            }
        }
    }

    println!("Simulation complete");
}
