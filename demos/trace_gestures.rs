use scrollstage::{Intent, Orchestrator, Phase};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn settle(eng: &mut Orchestrator, now: &mut f64) -> anyhow::Result<()> {
    while !matches!(eng.phase(), Phase::Idle | Phase::ContentScroll) {
        *now += FRAME_MS;
        eng.on_frame(*now)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut eng = Orchestrator::default_portfolio()?;
    let mut now = 0.0;

    eng.on_frame(now)?;
    while !eng.intro_complete() {
        now += FRAME_MS;
        eng.on_frame(now)?;
    }
    println!("intro done at {now:.0}ms, phase {:?}", eng.phase());

    // One decisive wheel notch begins the hero -> summary transition.
    let r = eng.on_wheel(80.0, now)?;
    println!("wheel intent: {:?}", r.intent);
    settle(&mut eng, &mut now)?;
    println!(
        "settled in {:?} on section {} at frame {}",
        eng.phase(),
        eng.context().current,
        eng.sequence_frame()
    );

    // Scroll through summary's overflow, then push out the bottom edge.
    eng.set_max_scroll(400.0)?;
    for _ in 0..16 {
        now += FRAME_MS;
        let r = eng.on_wheel(60.0, now)?;
        if let Some(Intent::BeginExit(dir)) = r.intent {
            println!("boundary exit fired ({dir:?})");
            break;
        }
        eng.on_frame(now)?;
    }
    settle(&mut eng, &mut now)?;
    println!(
        "final phase {:?} on section {}",
        eng.phase(),
        eng.context().current
    );

    Ok(())
}
