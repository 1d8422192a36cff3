use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;
use voxels::{
    export, from_density, iso_surface, FractalNoise, Mandelbulb, MriVolume, Sphere, VoxelField,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Source {
    Sphere,
    Mandelbulb,
    Cube,
    Noise,
    Mri,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_enum, default_value_t = Source::Mandelbulb)]
    source: Source,

    #[arg(long, default_value_t = 128)]
    size: usize,

    #[arg(long, default_value_t = 0.5)]
    radius: f32,

    #[arg(long, default_value_t = 3)]
    order: u32,

    #[arg(long, default_value_t = 20)]
    max_iter: u32,

    #[arg(long, default_value_t = FractalNoise::DEFAULT_ROUGHNESS)]
    roughness: f32,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "data/MRbrain/MRbrain.")]
    mri_base: String,

    #[arg(long, default_value_t = 1)]
    mri_start: u32,

    #[arg(long, default_value_t = 109)]
    mri_end: u32,

    /// Resample the generated field to this cubic size.
    #[arg(long)]
    resample: Option<usize>,

    #[arg(long, default_value_t = false)]
    normalize: bool,

    #[arg(short, long, default_value = "volume.raw")]
    out: String,

    #[arg(long)]
    header: Option<String>,

    #[arg(long)]
    preview: Option<String>,

    #[arg(long)]
    mesh: Option<String>,

    #[arg(long, default_value_t = 0.)]
    threshold: f32,
}

fn generate(args: &Args) -> anyhow::Result<VoxelField> {
    let field = match args.source {
        Source::Sphere => from_density(
            &Sphere::new(args.radius)?,
            args.size,
            args.size,
            args.size,
        )?,
        Source::Mandelbulb => from_density(
            &Mandelbulb::new(args.order, args.max_iter)?,
            args.size,
            args.size,
            args.size,
        )?,
        Source::Cube => VoxelField::cube(),
        Source::Noise => {
            let mut noise = FractalNoise::new(args.size)?.roughness(args.roughness)?;
            if let Some(seed) = args.seed {
                noise = noise.seed(seed);
            }
            noise.build()?
        }
        Source::Mri => MriVolume::new(&args.mri_base, args.mri_start, args.mri_end)
            .ratios(0.7, 1., -1.)
            .load()
            .with_context(|| format!("loading MRI slices from {}", args.mri_base))?,
    };
    Ok(field)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    log::info!("generating {:?} volume", args.source);
    let mut start = Instant::now();
    let mut field = generate(&args)?;
    log::info!(
        "generation took {} s ({:?})",
        start.elapsed().as_secs_f32(),
        field.dimensions()
    );

    if let Some(size) = args.resample {
        start = Instant::now();
        field = field.resample(size, size, size)?;
        log::info!("resampling took {} s", start.elapsed().as_secs_f32());
    }
    if args.normalize {
        field.normalize();
    }

    let mut out = BufWriter::new(
        File::create(&args.out).with_context(|| format!("creating {}", args.out))?,
    );
    export::write_raw(&field, &mut out)?;
    out.flush()?;
    log::info!("wrote {} voxels to {}", field.len(), args.out);

    if let Some(path) = &args.header {
        let file = File::create(path).with_context(|| format!("creating {}", path))?;
        serde_json::to_writer_pretty(file, &export::header_json(&field))?;
    }

    if let Some(path) = &args.preview {
        export::projection_image(&field)?
            .save(path)
            .with_context(|| format!("saving preview {}", path))?;
    }

    if let Some(path) = &args.mesh {
        start = Instant::now();
        let mesh = iso_surface(&field, args.threshold);
        let mut out =
            BufWriter::new(File::create(path).with_context(|| format!("creating {}", path))?);
        mesh.write_obj("iso_surface", &mut out)?;
        out.flush()?;
        log::info!(
            "iso surface with {} faces took {} s",
            mesh.faces().len(),
            start.elapsed().as_secs_f32()
        );
    }
    Ok(())
}
