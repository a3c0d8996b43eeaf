use anyhow::{Context, Result};
use hdf5::types::FixedAscii;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const GENES: usize = 50;
const SAMPLES: usize = 20;

/// Baseline and spread of one gene's predicted expression across samples.
struct GeneProfile {
    mean: f64,
    spread: f64,
}

impl GeneProfile {
    fn random(rng: &mut impl Rng) -> Self {
        GeneProfile {
            mean: rng.gen_range(-1.0..1.0),
            spread: rng.gen_range(0.05..0.25),
        }
    }

    fn sample(&self, rng: &mut impl Rng) -> f64 {
        self.mean + self.spread * rng.gen_range(-1.0..1.0)
    }
}

/// `(genes, samples)` matrix, one row per profile.
fn pred_expr(profiles: &[GeneProfile], samples: usize, rng: &mut impl Rng) -> Array2<f64> {
    Array2::from_shape_fn((profiles.len(), samples), |(g, _)| profiles[g].sample(rng))
}

/// Fixed-length byte strings, the layout h5py produces for numpy `S` arrays.
fn byte_strings(ids: &[String]) -> Result<Array1<FixedAscii<16>>> {
    ids.iter()
        .map(|id| FixedAscii::<16>::from_ascii(id).with_context(|| format!("id '{id}'")))
        .collect()
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_grex.h5".to_string());

    let mut rng = StdRng::seed_from_u64(42);

    let gene_ids: Vec<String> = (0..GENES).map(|i| format!("ENSG{:011}", 1000 + i * 7)).collect();
    let sample_ids: Vec<String> = (0..SAMPLES).map(|i| format!("SUBJ_{:04}", i + 1)).collect();

    let profiles: Vec<GeneProfile> = (0..GENES).map(|_| GeneProfile::random(&mut rng)).collect();
    let matrix = pred_expr(&profiles, SAMPLES, &mut rng);

    let file = hdf5::File::create(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    file.new_dataset_builder()
        .with_data(&byte_strings(&gene_ids)?)
        .create("genes")
        .context("writing genes")?;
    file.new_dataset_builder()
        .with_data(&byte_strings(&sample_ids)?)
        .create("samples")
        .context("writing samples")?;
    file.new_dataset_builder()
        .with_data(&matrix)
        .create("pred_expr")
        .context("writing pred_expr")?;

    println!(
        "Wrote {} genes x {} samples to {output_path}",
        gene_ids.len(),
        sample_ids.len()
    );
    Ok(())
}
