//! egui control panel
//!
//! The panel never touches the simulation directly. It reports what the
//! user asked for as [`Command`]s and the app applies them between steps.

use egui::{Color32, Context, RichText};
use gravity_core::diagnostics::Summary;
use gravity_core::{Body, DVec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Ring,
    Spiral,
    TwoGalaxies,
    Random,
    SolarSystem,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Ring,
        Shape::Spiral,
        Shape::TwoGalaxies,
        Shape::Random,
        Shape::SolarSystem,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Shape::Ring => "Ring",
            Shape::Spiral => "Spiral",
            Shape::TwoGalaxies => "Two Galaxies",
            Shape::Random => "Random",
            Shape::SolarSystem => "Solar System",
        }
    }
}

/// What a left click does in the simulation area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerMode {
    Spawn,
    Inspect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePause,
    Reset,
    ToggleTrails,
    Generate(Shape),
    /// Launch a cluster from `anchor`; both in world space
    SpawnCluster { anchor: DVec2, velocity: DVec2 },
    /// Select the body under a world-space point
    Select(DVec2),
}

/// Read-only state shown in the panel
pub struct Status<'a> {
    pub fps: f32,
    pub paused: bool,
    pub trails: bool,
    pub summary: Summary,
    pub selected: Option<&'a Body>,
}

/// Widget state owned by the host
pub struct ControlPanel {
    pub cluster_mass: f64,
    pub cluster_size: usize,
    pub mode: PointerMode,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            cluster_mass: 20.0,
            cluster_size: 10,
            mode: PointerMode::Spawn,
        }
    }
}

impl ControlPanel {
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            PointerMode::Spawn => PointerMode::Inspect,
            PointerMode::Inspect => PointerMode::Spawn,
        };
    }

    pub fn show(&mut self, ctx: &Context, status: &Status) -> Vec<Command> {
        let mut commands = Vec::new();

        egui::SidePanel::left("controls_panel")
            .resizable(false)
            .default_width(210.0)
            .show(ctx, |ui| {
                ui.heading(RichText::new("Gravity").color(Color32::LIGHT_BLUE));
                ui.separator();

                ui.horizontal(|ui| {
                    let label = if status.paused { "Play" } else { "Pause" };
                    if ui.button(label).clicked() {
                        commands.push(Command::TogglePause);
                    }
                    if ui.button("Reset").clicked() {
                        commands.push(Command::Reset);
                    }
                });

                ui.add_space(6.0);
                for shape in Shape::ALL {
                    if ui.button(shape.label()).clicked() {
                        commands.push(Command::Generate(shape));
                    }
                }

                ui.add_space(6.0);
                ui.separator();
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.mode, PointerMode::Spawn, "Spawn");
                    ui.selectable_value(&mut self.mode, PointerMode::Inspect, "Inspect");
                });
                ui.add(egui::Slider::new(&mut self.cluster_mass, 1.0..=200.0).text("Mass"));
                ui.add(egui::Slider::new(&mut self.cluster_size, 1..=100).text("Cluster size"));

                let mut trails = status.trails;
                if ui.checkbox(&mut trails, "Orbit trails").changed() {
                    commands.push(Command::ToggleTrails);
                }

                ui.separator();
                ui.label(format!("FPS: {:.0}", status.fps));
                ui.label(format!("Bodies: {}", status.summary.count));
                ui.label(format!("Kinetic energy: {:.3e}", status.summary.kinetic_energy));
                ui.label(format!("Total energy: {:.3e}", status.summary.total_energy()));
                if status.paused {
                    ui.label(RichText::new("PAUSED").color(Color32::YELLOW));
                } else {
                    ui.label(RichText::new("RUNNING").color(Color32::GREEN));
                }

                if let Some(body) = status.selected {
                    ui.separator();
                    ui.label(RichText::new("Selected body").strong());
                    ui.label(format!("Mass: {:.2}", body.mass));
                    ui.label(format!("Velocity: {:.2}", body.speed()));
                }

                ui.add_space(8.0);
                draw_equations(ui);
            });

        commands
    }
}

/// An equation with its name and formula
struct Equation {
    name: &'static str,
    formula: &'static str,
    description: &'static str,
}

const EQUATIONS: &[Equation] = &[
    Equation {
        name: "Capped gravitation",
        formula: "F = min(G·m₁·m₂ / (r² + ε), F_max)",
        description: "Pairwise force, softened and capped",
    },
    Equation {
        name: "Acceleration",
        formula: "aᵢ = Σⱼ Fᵢⱼ·r̂ᵢⱼ / mᵢ",
        description: "Each body divides by its own mass",
    },
    Equation {
        name: "Semi-implicit Euler",
        formula: "v += a·dt;  x += v·dt",
        description: "Velocity first, then position",
    },
];

fn draw_equations(ui: &mut egui::Ui) {
    ui.collapsing(RichText::new("Equations").strong(), |ui| {
        for eq in EQUATIONS {
            ui.group(|ui| {
                ui.label(RichText::new(eq.name).strong().color(Color32::YELLOW));
                ui.label(RichText::new(eq.formula).monospace().color(Color32::WHITE));
                ui.label(RichText::new(eq.description).small().italics());
            });
            ui.add_space(4.0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_toggles_between_spawn_and_inspect() {
        let mut panel = ControlPanel::default();
        assert_eq!(panel.mode, PointerMode::Spawn);
        panel.toggle_mode();
        assert_eq!(panel.mode, PointerMode::Inspect);
        panel.toggle_mode();
        assert_eq!(panel.mode, PointerMode::Spawn);
    }

    #[test]
    fn every_shape_has_a_label() {
        let labels: Vec<_> = Shape::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            ["Ring", "Spiral", "Two Galaxies", "Random", "Solar System"]
        );
    }
}
