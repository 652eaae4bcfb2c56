use std::path::{Path, PathBuf};

use graph_ops_lib::command::execute_json_batch;
use graph_ops_lib::fixtures;
use graph_ops_lib::harness::TestHarness;
use graph_ops_lib::state::{AppSettings, SceneState};
use graph_ops_lib::EditorError;

struct Args {
    scene: Option<PathBuf>,
    script: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "graph_ops=info,graph_ops_lib=info".into()),
        )
        .init();

    let args = parse_args();

    if let Err(e) = run(&args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), EditorError> {
    let mut harness = TestHarness::with_settings(AppSettings::load());

    match &args.scene {
        Some(path) => harness.state.set_scene(SceneState::load_file(path)?),
        None => harness.load_scene(&fixtures::default_scene()),
    }
    harness.scene_mut().select_first();
    tracing::info!("Scene ready ({} models)", harness.model_count());

    let Some(script) = &args.script else {
        println!("{}", harness.export_scene_json()?);
        return Ok(());
    };

    let responses = run_script(&mut harness, script)?;
    println!("{}", serde_json::to_string_pretty(&responses)?);

    if let Err(e) = harness.scene().autosave() {
        tracing::warn!("Autosave failed: {e}");
    }
    Ok(())
}

fn run_script(
    harness: &mut TestHarness,
    path: &Path,
) -> Result<Vec<graph_ops_lib::command::CommandResponse>, EditorError> {
    let json = std::fs::read_to_string(path)?;
    let responses = execute_json_batch(harness, &json)?;
    let failed = responses.iter().filter(|r| !r.success).count();
    tracing::info!(
        "Ran {} commands from {} ({failed} failed)",
        responses.len(),
        path.display()
    );
    Ok(responses)
}

fn parse_args() -> Args {
    let mut args = Args {
        scene: None,
        script: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--scene" => args.scene = iter.next().map(PathBuf::from),
            "--script" => args.script = iter.next().map(PathBuf::from),
            other => tracing::warn!("Ignoring unknown argument {other}"),
        }
    }
    args
}
