use anyhow::{Context, bail};
use flump_rs::library::pack_libraries;
use flump_rs::{FileFetcher, HttpFetcher, Library, LoaderSettings, ShelfPacker, Symbol};
use std::path::PathBuf;
use std::sync::Arc;

struct Args {
    pack: bool,
    out: Option<PathBuf>,
    libraries: Vec<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        pack: false,
        out: None,
        libraries: Vec::new(),
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--pack" => args.pack = true,
            "--out" => {
                let dir = iter.next().context("--out needs a directory")?;
                args.out = Some(PathBuf::from(dir));
            }
            _ => args.libraries.push(arg),
        }
    }

    if args.libraries.is_empty() {
        bail!("usage: flump-rs [--pack] [--out DIR] <library-dir-or-url>...");
    }
    Ok(args)
}

async fn load(base: &str, settings: &LoaderSettings) -> anyhow::Result<Library> {
    let library = if base.starts_with("http://") || base.starts_with("https://") {
        Library::from_assets_with(base, &settings.manifest_name, Arc::new(HttpFetcher::new())).await
    } else {
        Library::from_assets_with(base, &settings.manifest_name, Arc::new(FileFetcher::new())).await
    };
    library.with_context(|| format!("failed to load library '{}'", base))
}

fn describe(base: &str, library: &Library) {
    let (mut movies, mut textures) = (0, 0);
    for name in library.symbol_names() {
        match library.symbol(name) {
            Some(Symbol::Movie(movie)) => {
                movies += 1;
                log::info!(
                    "  movie '{}': {} layers, {} frames",
                    name,
                    movie.layers.len(),
                    movie.frames()
                );
            }
            Some(Symbol::Texture(_)) => textures += 1,
            None => {}
        }
    }
    println!(
        "{}: {} movies, {} textures, {} fps",
        base,
        movies,
        textures,
        library.frame_rate()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let mut settings = LoaderSettings::load();
    if let Some(dir) = &args.out {
        settings.pack_output_dir = Some(dir.clone());
        if let Err(e) = settings.save() {
            log::warn!("could not persist loader settings: {}", e);
        }
    }

    let mut libraries = Vec::with_capacity(args.libraries.len());
    for base in &args.libraries {
        let library = load(base, &settings).await?;
        describe(base, &library);
        libraries.push(library);
    }

    if args.pack {
        let mut packer = ShelfPacker::new(settings.pack_page_size, settings.pack_padding);
        pack_libraries(&mut libraries, &mut packer)?;
        println!("packed into {} atlases", packer.pages().len());

        if let Some(dir) = settings.pack_output_dir {
            std::fs::create_dir_all(&dir)?;
            for (index, page) in packer.pages().iter().enumerate() {
                let path = dir.join(format!("atlas{}.png", index));
                page.save(&path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
        }
    }

    Ok(())
}
