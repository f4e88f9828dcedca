//! Voxedit command line tool.
//!
//! Usage:
//!   voxedit info <model.json>
//!   voxedit replay <intents.json> [--out model.json] [--name NAME] [--config config.json]
//!   voxedit mesh <model.json> [--out mesh.json] [--scale S]
//!
//! `replay` reads a JSON array of intents such as
//! `[{"op": "add", "position": [0, 0.5, 0]}, {"op": "undo"}]`, runs them
//! through an editor and saves the resulting model.

use std::path::PathBuf;
use std::process::ExitCode;

use voxedit::core::{logging, EditorConfig, Error, Result};
use voxedit::edit::{Editor, Intent};
use voxedit::math::Aabb;
use voxedit::mesh::{build_color_meshes, group_by_color};
use voxedit::storage::{deserialize_model, SerializedModel};
use voxedit::voxel::count_visible_faces;

const USAGE: &str = "usage: voxedit <info|replay|mesh> <input.json> [--out PATH] [--name NAME] [--config PATH] [--scale S]";

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let (Some(command), Some(input)) = (args.get(1), args.get(2)) else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };
    let input = PathBuf::from(input);

    let result = match command.as_str() {
        "info" => info(&input),
        "replay" => replay(&input, &args),
        "mesh" => mesh(&input, &args),
        other => {
            eprintln!("unknown command '{}'\n{}", other, USAGE);
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn info(input: &PathBuf) -> Result<()> {
    let model = SerializedModel::load(input)?;
    let voxels = deserialize_model(&model);

    println!("=== {} ===", model.name);
    println!("Voxels:        {}", voxels.len());
    println!("Colors:        {}", group_by_color(&voxels).len());
    println!("Visible faces: {}", count_visible_faces(&voxels));
    if let Some(bounds) = Aabb::enclosing(voxels.iter().map(|v| v.position)) {
        println!("Centers:       {} .. {}", bounds.min, bounds.max);
    }
    if let Some(metadata) = &model.metadata {
        if let Some(author) = &metadata.author {
            println!("Author:        {}", author);
        }
        if let Some(tags) = &metadata.tags {
            println!("Tags:          {}", tags.join(", "));
        }
    }
    Ok(())
}

fn replay(input: &PathBuf, args: &[String]) -> Result<()> {
    let config = match parse_str_arg(args, "--config") {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let out = parse_str_arg(args, "--out").unwrap_or_else(|| "model.json".to_string());
    let name = parse_str_arg(args, "--name").unwrap_or_else(|| "untitled".to_string());

    let intents: Vec<Intent> = serde_json::from_str(&std::fs::read_to_string(input)?)?;
    let mut editor = Editor::new(config)?;

    let total = intents.len();
    let mut ignored = 0;
    for (i, intent) in intents.into_iter().enumerate() {
        let outcome = editor.apply(intent)?;
        if !outcome.changed() {
            log::warn!("Intent {} ignored: {:?}", i, outcome);
            ignored += 1;
        }
    }
    log::info!(
        "Replayed {} intents ({} ignored), {} voxels, history {:?}",
        total,
        ignored,
        editor.voxels().len(),
        editor.undo_redo_state()
    );

    editor.to_model(name, None).save(&out)
}

fn mesh(input: &PathBuf, args: &[String]) -> Result<()> {
    let scale = match parse_str_arg(args, "--scale") {
        Some(s) => s
            .parse::<f32>()
            .map_err(|e| Error::Config(format!("--scale '{}': {}", s, e)))?,
        None => EditorConfig::default().voxel_scale,
    };
    let out = parse_str_arg(args, "--out").unwrap_or_else(|| "mesh.json".to_string());

    let voxels = deserialize_model(&SerializedModel::load(input)?);
    let meshes = build_color_meshes(&voxels, scale * 0.5);

    let faces: usize = meshes.iter().map(|m| m.mesh.face_count()).sum();
    std::fs::write(&out, serde_json::to_string(&meshes)?)?;
    log::info!("Wrote {} color meshes ({} faces) to {}", meshes.len(), faces, out);
    Ok(())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.clone())
}
