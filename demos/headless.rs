use mapview::{
    input::{MouseButton, PointerSource},
    Color, Envelope, Feature, FrameClock, InputEvent, KeyCode, Layer, MemoryLayer, Point,
    Renderer, ViewController, ViewEvent, ViewOptions, Viewport,
};
use std::{sync::Arc, time::Duration};

/// Renderer that writes one line per visible feature
struct TextRenderer;

impl Renderer for TextRenderer {
    type Surface = Vec<String>;

    fn render(
        &mut self,
        surface: &mut Self::Surface,
        viewport: &Viewport,
        layers: &[Arc<dyn Layer>],
        _background: Color,
    ) {
        surface.clear();
        let extent = viewport.extent();
        for layer in layers {
            for feature in layer.features_in_view(&extent, 0.0) {
                if let Some(world) = feature.centroid() {
                    let screen = viewport.world_to_screen(world);
                    surface.push(format!(
                        "{}/{} at ({:.1}, {:.1})",
                        layer.name(),
                        feature.id,
                        screen.x,
                        screen.y
                    ));
                }
            }
        }
    }
}

fn pointer(kind: &str, x: f64, y: f64) -> InputEvent {
    let position = Point::new(x, y);
    match kind {
        "down" => InputEvent::PointerDown {
            position,
            button: MouseButton::Left,
            source: PointerSource::Mouse,
        },
        "up" => InputEvent::PointerUp {
            position,
            button: MouseButton::Left,
            source: PointerSource::Mouse,
        },
        _ => InputEvent::PointerMove {
            position,
            source: PointerSource::Mouse,
        },
    }
}

/// Drives a view controller without a window: scripted input, a simulated
/// paint loop and a text renderer
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut view = ViewController::new(ViewOptions::default());
    view.add_layer(Arc::new(MemoryLayer::with_features(
        "cities",
        vec![
            Feature::point("harbor", -120.0, 40.0),
            Feature::point("market", 0.0, 0.0),
            Feature::point("station", 150.0, -90.0),
        ],
    )))?;
    view.set_envelope(Some(Envelope::from_coords(-400.0, -300.0, 400.0, 300.0)));

    view.on("viewchanged", |event| {
        if let ViewEvent::ViewChanged {
            viewport,
            user_action,
        } = event
        {
            log::info!(
                "view changed: center ({:.1}, {:.1}) resolution {:.3} user {}",
                viewport.center.x,
                viewport.center.y,
                viewport.resolution(),
                user_action
            );
        }
    });
    view.on("mouseinfoover", |event| {
        if let ViewEvent::MouseInfoOver {
            layer_name,
            feature,
        } = event
        {
            log::info!("hovering {}/{}", layer_name, feature.id);
        }
    });
    view.on("mouseinfoleave", |_| log::info!("hover ended"));

    view.handle_input(InputEvent::Resize {
        width: 800.0,
        height: 600.0,
    });
    println!(
        "Initialized: {} (resolution {:.3})",
        view.is_initialized(),
        view.viewport().resolution()
    );

    let script = vec![
        pointer("move", 400.0, 300.0),
        pointer("move", 10.0, 10.0),
        pointer("down", 400.0, 300.0),
        pointer("move", 350.0, 280.0),
        pointer("up", 350.0, 280.0),
        InputEvent::Wheel {
            delta: 120.0,
            position: Point::new(200.0, 150.0),
        },
        InputEvent::KeyDown {
            key: KeyCode::LeftCtrl,
        },
        pointer("down", 100.0, 100.0),
        pointer("move", 300.0, 250.0),
        pointer("up", 300.0, 250.0),
        InputEvent::KeyUp {
            key: KeyCode::LeftCtrl,
        },
    ];

    let mut renderer = TextRenderer;
    let mut surface = Vec::new();
    let mut clock = FrameClock::new();

    for event in script {
        view.handle_input(event);
        for _ in 0..3 {
            std::thread::sleep(Duration::from_millis(16));
            view.tick(clock.tick());
            view.process_events();
        }
    }

    // Let any running zoom animation finish
    while view.is_animating() {
        std::thread::sleep(Duration::from_millis(16));
        view.tick(clock.tick());
        view.process_events();
    }

    if view.render_frame(&mut renderer, &mut surface) {
        println!("Frame:");
        for line in &surface {
            println!("  {}", line);
        }
    }

    let viewport = view.viewport();
    println!(
        "Final view: center ({:.1}, {:.1}) resolution {:.3}",
        viewport.center.x,
        viewport.center.y,
        viewport.resolution()
    );

    Ok(())
}
