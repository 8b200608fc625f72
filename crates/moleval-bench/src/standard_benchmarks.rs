//! The published battery of benchmarks.
//!
//! Every factory fixes its target molecules, fingerprint kinds, thresholds
//! and modifier parameters; these are reference parameters and must not be
//! changed, or scores stop being comparable across implementations.

use std::path::Path;
use std::sync::Arc;

use moleval_chem::{ChemBackend, Descriptor, FingerprintKind};
use moleval_common::{data, Result};

use crate::contributions::ContributionSpecification;
use crate::distribution::NoveltyBenchmark;
use crate::frechet::FrechetBenchmark;
use crate::goal_directed::GoalDirectedBenchmark;
use crate::kldiv::KlDivBenchmark;
use crate::modifiers::ScoreModifier;
use crate::scoring::{
    DescriptorScoringFunction, IsomerScoringFunction, MeanKind, MeanScoringFunction,
    ScoringFunction, SmartsScoringFunction, TanimotoScoringFunction,
};

fn descriptor_fn(
    backend: &Arc<dyn ChemBackend>,
    descriptor: Descriptor,
    modifier: ScoreModifier,
) -> Arc<dyn ScoringFunction> {
    Arc::new(DescriptorScoringFunction::new(backend.clone(), descriptor, modifier))
}

fn tanimoto_fn(
    backend: &Arc<dyn ChemBackend>,
    target: &str,
    kind: FingerprintKind,
    modifier: ScoreModifier,
) -> Result<Arc<dyn ScoringFunction>> {
    Ok(Arc::new(TanimotoScoringFunction::new(
        backend.clone(),
        target,
        kind,
        modifier,
    )?))
}

/// Similarity benchmark: rediscovery (threshold 1.0, top-1 only) or
/// "generate similar molecules" (clipped ramp, top 1/10/100).
pub fn similarity(
    backend: &Arc<dyn ChemBackend>,
    smiles: &str,
    name: &str,
    kind: FingerprintKind,
    threshold: f64,
    rediscovery: bool,
) -> Result<GoalDirectedBenchmark> {
    let category = if rediscovery { "rediscovery" } else { "similarity" };
    let benchmark_name = format!("{name} {category}");

    let objective = tanimoto_fn(backend, smiles, kind, ScoreModifier::clipped(threshold))?;
    let specification = if rediscovery {
        ContributionSpecification::uniform(&[1])
    } else {
        ContributionSpecification::uniform(&[1, 10, 100])
    };

    Ok(GoalDirectedBenchmark::new(
        &benchmark_name,
        objective,
        specification,
        backend.clone(),
    ))
}

pub fn logp_benchmark(backend: &Arc<dyn ChemBackend>, target: f64) -> GoalDirectedBenchmark {
    GoalDirectedBenchmark::new(
        &format!("logP (target: {target})"),
        descriptor_fn(backend, Descriptor::LogP, ScoreModifier::Gaussian { mu: target, sigma: 1.0 }),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    )
}

pub fn tpsa_benchmark(backend: &Arc<dyn ChemBackend>, target: f64) -> GoalDirectedBenchmark {
    GoalDirectedBenchmark::new(
        &format!("TPSA (target: {target})"),
        descriptor_fn(backend, Descriptor::Tpsa, ScoreModifier::Gaussian { mu: target, sigma: 20.0 }),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    )
}

pub fn qed_benchmark(backend: &Arc<dyn ChemBackend>) -> GoalDirectedBenchmark {
    GoalDirectedBenchmark::new(
        "QED",
        descriptor_fn(backend, Descriptor::Qed, ScoreModifier::Identity),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    )
}

pub fn cns_mpo(backend: &Arc<dyn ChemBackend>, max_logp: f64) -> GoalDirectedBenchmark {
    let objective = MeanScoringFunction::geometric(vec![
        descriptor_fn(backend, Descriptor::LogP, ScoreModifier::MinGaussian { mu: max_logp, sigma: 1.0 }),
        descriptor_fn(backend, Descriptor::MolecularWeight, ScoreModifier::MinGaussian { mu: 360.0, sigma: 60.0 }),
        descriptor_fn(backend, Descriptor::Tpsa, ScoreModifier::MaxGaussian { mu: 40.0, sigma: 20.0 }),
        descriptor_fn(backend, Descriptor::NumHDonors, ScoreModifier::MinGaussian { mu: 1.0, sigma: 2.0 }),
    ]);
    GoalDirectedBenchmark::new(
        "CNS MPO",
        Arc::new(objective),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    )
}

pub fn isomers_c11h24(backend: &Arc<dyn ChemBackend>, mean: MeanKind) -> Result<GoalDirectedBenchmark> {
    Ok(GoalDirectedBenchmark::new(
        "C11H24",
        Arc::new(IsomerScoringFunction::new(backend.clone(), "C11H24", mean)?),
        ContributionSpecification::uniform(&[159]),
        backend.clone(),
    ))
}

pub fn isomers_c7h8n2o2(backend: &Arc<dyn ChemBackend>, mean: MeanKind) -> Result<GoalDirectedBenchmark> {
    Ok(GoalDirectedBenchmark::new(
        "C7H8N2O2",
        Arc::new(IsomerScoringFunction::new(backend.clone(), "C7H8N2O2", mean)?),
        ContributionSpecification::uniform(&[100]),
        backend.clone(),
    ))
}

pub fn isomers_c9h10n2o2pf2cl(
    backend: &Arc<dyn ChemBackend>,
    mean: MeanKind,
    n_samples: usize,
) -> Result<GoalDirectedBenchmark> {
    Ok(GoalDirectedBenchmark::new(
        "C9H10N2O2PF2Cl",
        Arc::new(IsomerScoringFunction::new(backend.clone(), "C9H10N2O2PF2Cl", mean)?),
        ContributionSpecification::uniform(&[n_samples]),
        backend.clone(),
    ))
}

pub fn hard_cobimetinib(backend: &Arc<dyn ChemBackend>, max_logp: f64) -> Result<GoalDirectedBenchmark> {
    let smiles = "OC1(CN2CCC1CC2)C(=O)c1ccc(F)c(F)c1Nc1ccc(I)cc1F";
    let objective = MeanScoringFunction::arithmetic(vec![
        tanimoto_fn(backend, smiles, FingerprintKind::Fcfp4, ScoreModifier::clipped(0.7))?,
        descriptor_fn(backend, Descriptor::NumRotatableBonds, ScoreModifier::MinGaussian { mu: 3.0, sigma: 1.0 }),
        descriptor_fn(backend, Descriptor::NumAromaticRings, ScoreModifier::MaxGaussian { mu: 3.0, sigma: 1.0 }),
        descriptor_fn(backend, Descriptor::LogP, ScoreModifier::MinGaussian { mu: max_logp, sigma: 1.0 }),
    ]);
    Ok(GoalDirectedBenchmark::new(
        "Cobimetinib MPO",
        Arc::new(objective),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    ))
}

pub fn hard_osimertinib(backend: &Arc<dyn ChemBackend>, mean: MeanKind) -> Result<GoalDirectedBenchmark> {
    let smiles = "COc1cc(N(C)CCN(C)C)c(NC(=O)C=C)cc1Nc1nccc(-c2cn(C)c3ccccc23)n1";
    let objective = MeanScoringFunction::with_kind(
        mean,
        vec![
            tanimoto_fn(backend, smiles, FingerprintKind::Fcfp4, ScoreModifier::clipped(0.8))?,
            tanimoto_fn(backend, smiles, FingerprintKind::Ecfp6, ScoreModifier::MinGaussian { mu: 0.85, sigma: 0.1 })?,
            descriptor_fn(backend, Descriptor::Tpsa, ScoreModifier::MaxGaussian { mu: 100.0, sigma: 10.0 }),
            descriptor_fn(backend, Descriptor::LogP, ScoreModifier::MinGaussian { mu: 1.0, sigma: 1.0 }),
        ],
    );
    Ok(GoalDirectedBenchmark::new(
        "Osimertinib MPO",
        Arc::new(objective),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    ))
}

pub fn hard_fexofenadine(backend: &Arc<dyn ChemBackend>, mean: MeanKind) -> Result<GoalDirectedBenchmark> {
    let smiles = "CC(C)(C(=O)O)c1ccc(cc1)C(O)CCCN2CCC(CC2)C(O)(c3ccccc3)c4ccccc4";
    let objective = MeanScoringFunction::with_kind(
        mean,
        vec![
            tanimoto_fn(backend, smiles, FingerprintKind::AtomPair, ScoreModifier::clipped(0.8))?,
            descriptor_fn(backend, Descriptor::Tpsa, ScoreModifier::MaxGaussian { mu: 90.0, sigma: 10.0 }),
            descriptor_fn(backend, Descriptor::LogP, ScoreModifier::MinGaussian { mu: 4.0, sigma: 1.0 }),
        ],
    );
    Ok(GoalDirectedBenchmark::new(
        "Fexofenadine MPO",
        Arc::new(objective),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    ))
}

const RANOLAZINE: &str = "COc1ccccc1OCC(O)CN2CCN(CC(=O)Nc3c(C)cccc3C)CC2";

pub fn ranolazine_mpo(backend: &Arc<dyn ChemBackend>) -> Result<GoalDirectedBenchmark> {
    let objective = MeanScoringFunction::geometric(vec![
        tanimoto_fn(backend, RANOLAZINE, FingerprintKind::AtomPair, ScoreModifier::clipped(0.7))?,
        descriptor_fn(backend, Descriptor::LogP, ScoreModifier::MaxGaussian { mu: 7.0, sigma: 1.0 }),
        descriptor_fn(backend, Descriptor::Tpsa, ScoreModifier::MaxGaussian { mu: 95.0, sigma: 20.0 }),
        descriptor_fn(backend, Descriptor::NumFluorineAtoms, ScoreModifier::Gaussian { mu: 1.0, sigma: 1.0 }),
    ]);
    Ok(GoalDirectedBenchmark::new(
        "Ranolazine MPO",
        Arc::new(objective),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    ))
}

/// Ranolazine MPO with the target itself as the starting population.
pub fn start_pop_ranolazine(backend: &Arc<dyn ChemBackend>) -> Result<GoalDirectedBenchmark> {
    Ok(ranolazine_mpo(backend)?.with_starting_population(vec![RANOLAZINE.to_string()]))
}

pub fn weird_physchem(backend: &Arc<dyn ChemBackend>) -> GoalDirectedBenchmark {
    let objective = MeanScoringFunction::arithmetic(vec![
        descriptor_fn(backend, Descriptor::BertzComplexity, ScoreModifier::MaxGaussian { mu: 1500.0, sigma: 200.0 }),
        descriptor_fn(backend, Descriptor::MolecularWeight, ScoreModifier::MinGaussian { mu: 400.0, sigma: 40.0 }),
        descriptor_fn(backend, Descriptor::NumAromaticRings, ScoreModifier::MinGaussian { mu: 3.0, sigma: 1.0 }),
        descriptor_fn(backend, Descriptor::NumFluorineAtoms, ScoreModifier::Gaussian { mu: 6.0, sigma: 1.0 }),
    ]);
    GoalDirectedBenchmark::new(
        "Physchem MPO",
        Arc::new(objective),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    )
}

pub fn median_camphor_menthol(backend: &Arc<dyn ChemBackend>, mean: MeanKind) -> Result<GoalDirectedBenchmark> {
    let camphor = "CC1(C)C2CCC1(C)C(=O)C2";
    let menthol = "CC(C)C1CCC(C)CC1O";
    let objective = MeanScoringFunction::with_kind(
        mean,
        vec![
            tanimoto_fn(backend, camphor, FingerprintKind::Ecfp4, ScoreModifier::Identity)?,
            tanimoto_fn(backend, menthol, FingerprintKind::Ecfp4, ScoreModifier::Identity)?,
        ],
    );
    Ok(GoalDirectedBenchmark::new(
        "Median molecules 1",
        Arc::new(objective),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    ))
}

pub fn median_tadalafil_sildenafil(backend: &Arc<dyn ChemBackend>, mean: MeanKind) -> Result<GoalDirectedBenchmark> {
    let tadalafil = "O=C1N(CC(N2C1CC3=C(C2C4=CC5=C(OCO5)C=C4)NC6=CC=CC=C36)=O)C";
    let sildenafil = "CCCC1=NN(C)C2=C1NC(=NC2=O)C1=CC(=CC=C1OCC)S(=O)(=O)N1CCN(C)CC1";
    let objective = MeanScoringFunction::with_kind(
        mean,
        vec![
            tanimoto_fn(backend, tadalafil, FingerprintKind::Ecfp6, ScoreModifier::Identity)?,
            tanimoto_fn(backend, sildenafil, FingerprintKind::Ecfp6, ScoreModifier::Identity)?,
        ],
    );
    Ok(GoalDirectedBenchmark::new(
        "Median molecules 2",
        Arc::new(objective),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    ))
}

pub fn pioglitazone_mpo(backend: &Arc<dyn ChemBackend>) -> Result<GoalDirectedBenchmark> {
    let smiles = "O=C1NC(=O)SC1Cc3ccc(OCCc2ncc(cc2)CC)cc3";
    let objective = MeanScoringFunction::geometric(vec![
        tanimoto_fn(backend, smiles, FingerprintKind::Ecfp4, ScoreModifier::Gaussian { mu: 0.0, sigma: 0.1 })?,
        descriptor_fn(backend, Descriptor::MolecularWeight, ScoreModifier::Gaussian { mu: 356.0, sigma: 10.0 }),
        descriptor_fn(backend, Descriptor::NumRotatableBonds, ScoreModifier::Gaussian { mu: 2.0, sigma: 0.5 }),
    ]);
    Ok(GoalDirectedBenchmark::new(
        "Pioglitazone MPO",
        Arc::new(objective),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    ))
}

pub fn perindopril_rings(backend: &Arc<dyn ChemBackend>) -> Result<GoalDirectedBenchmark> {
    let perindopril = "O=C(OCC)C(NC(C(=O)N1C(C(=O)O)CC2CCCCC12)C)CCC";
    let objective = MeanScoringFunction::geometric(vec![
        tanimoto_fn(backend, perindopril, FingerprintKind::Ecfp4, ScoreModifier::Identity)?,
        descriptor_fn(backend, Descriptor::NumAromaticRings, ScoreModifier::Gaussian { mu: 2.0, sigma: 0.5 }),
    ]);
    Ok(GoalDirectedBenchmark::new(
        "Perindopril MPO",
        Arc::new(objective),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    ))
}

pub fn amlodipine_rings(backend: &Arc<dyn ChemBackend>) -> Result<GoalDirectedBenchmark> {
    let amlodipine = "Clc1ccccc1C2C(=C(/N/C(=C2/C(=O)OCC)COCCN)C)\\C(=O)OC";
    let objective = MeanScoringFunction::geometric(vec![
        tanimoto_fn(backend, amlodipine, FingerprintKind::Ecfp4, ScoreModifier::Identity)?,
        descriptor_fn(backend, Descriptor::NumRings, ScoreModifier::Gaussian { mu: 3.0, sigma: 0.5 }),
    ]);
    Ok(GoalDirectedBenchmark::new(
        "Amlodipine MPO",
        Arc::new(objective),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    ))
}

pub fn sitagliptin_replacement(backend: &Arc<dyn ChemBackend>) -> Result<GoalDirectedBenchmark> {
    // Find molecules dissimilar to sitagliptin with its formula and physchem profile.
    let sitagliptin = "Fc1cc(c(F)cc1F)CC(N)CC(=O)N3Cc2nnc(n2CC3)C(F)(F)F";
    let objective = MeanScoringFunction::geometric(vec![
        tanimoto_fn(backend, sitagliptin, FingerprintKind::Ecfp4, ScoreModifier::Gaussian { mu: 0.0, sigma: 0.1 })?,
        descriptor_fn(backend, Descriptor::LogP, ScoreModifier::Gaussian { mu: 2.0165, sigma: 0.2 }),
        descriptor_fn(backend, Descriptor::Tpsa, ScoreModifier::Gaussian { mu: 77.04, sigma: 5.0 }),
        Arc::new(IsomerScoringFunction::new(backend.clone(), "C16H15F6N5O", MeanKind::Geometric)?),
    ]);
    Ok(GoalDirectedBenchmark::new(
        "Sitagliptin MPO",
        Arc::new(objective),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    ))
}

pub fn zaleplon_with_other_formula(backend: &Arc<dyn ChemBackend>) -> Result<GoalDirectedBenchmark> {
    let zaleplon = "O=C(C)N(CC)c1cccc(c1)c2ccnc3cc(C#N)ccc23";
    let objective = MeanScoringFunction::geometric(vec![
        tanimoto_fn(backend, zaleplon, FingerprintKind::Ecfp4, ScoreModifier::Identity)?,
        Arc::new(IsomerScoringFunction::new(backend.clone(), "C19H17N3O2", MeanKind::Geometric)?),
    ]);
    Ok(GoalDirectedBenchmark::new(
        "Zaleplon MPO",
        Arc::new(objective),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    ))
}

pub fn valsartan_smarts(backend: &Arc<dyn ChemBackend>) -> GoalDirectedBenchmark {
    // Valsartan substructure with the physchem profile of sitagliptin.
    let smarts = "CN(C=O)Cc1ccc(c2ccccc2)cc1";
    let objective = MeanScoringFunction::geometric(vec![
        Arc::new(SmartsScoringFunction::new(backend.clone(), smarts, false)) as Arc<dyn ScoringFunction>,
        descriptor_fn(backend, Descriptor::LogP, ScoreModifier::Gaussian { mu: 2.0165, sigma: 0.2 }),
        descriptor_fn(backend, Descriptor::Tpsa, ScoreModifier::Gaussian { mu: 77.04, sigma: 5.0 }),
        descriptor_fn(backend, Descriptor::BertzComplexity, ScoreModifier::Gaussian { mu: 896.38, sigma: 30.0 }),
    ]);
    GoalDirectedBenchmark::new(
        "Valsartan SMARTS",
        Arc::new(objective),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    )
}

const DECO_HOP_TARGET: &str = "CCCOc1cc2ncnc(Nc3ccc4ncsc4c3)c2cc1S(=O)(=O)C(C)(C)C";
const DECO_HOP_SCAFFOLD: &str = "[#7]-c1n[c;h1]nc2[c;h1]c(-[#8])[c;h0][c;h1]c12";

pub fn decoration_hop(backend: &Arc<dyn ChemBackend>) -> Result<GoalDirectedBenchmark> {
    // Keep the scaffold, replace both decorations.
    let objective = MeanScoringFunction::arithmetic(vec![
        tanimoto_fn(backend, DECO_HOP_TARGET, FingerprintKind::Pharmacophore, ScoreModifier::clipped(0.85))?,
        Arc::new(SmartsScoringFunction::new(backend.clone(), DECO_HOP_SCAFFOLD, false)),
        Arc::new(SmartsScoringFunction::new(backend.clone(), "CS([#6])(=O)=O", true)),
        Arc::new(SmartsScoringFunction::new(backend.clone(), "[#7]-c1ccc2ncsc2c1", true)),
    ]);
    Ok(GoalDirectedBenchmark::new(
        "Deco Hop",
        Arc::new(objective),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    ))
}

pub fn scaffold_hop(backend: &Arc<dyn ChemBackend>) -> Result<GoalDirectedBenchmark> {
    // Replace the scaffold, keep the decorations.
    let objective = MeanScoringFunction::arithmetic(vec![
        tanimoto_fn(backend, DECO_HOP_TARGET, FingerprintKind::Pharmacophore, ScoreModifier::clipped(0.75))?,
        Arc::new(SmartsScoringFunction::new(backend.clone(), DECO_HOP_SCAFFOLD, true)),
        Arc::new(SmartsScoringFunction::new(
            backend.clone(),
            "[#6]-[#6]-[#6]-[#8]-[#6]~[#6]~[#6]~[#6]~[#6]-[#7]-c1ccc2ncsc2c1",
            false,
        )),
    ]);
    Ok(GoalDirectedBenchmark::new(
        "Scaffold Hop",
        Arc::new(objective),
        ContributionSpecification::uniform(&[1, 10, 100]),
        backend.clone(),
    ))
}

pub fn novelty_benchmark<P: AsRef<Path>>(
    backend: &Arc<dyn ChemBackend>,
    training_set_file: P,
    number_samples: usize,
) -> Result<NoveltyBenchmark> {
    let training_set = data::load_smiles_file(training_set_file)?;
    Ok(NoveltyBenchmark::new(backend.clone(), &training_set, number_samples))
}

pub fn kldiv_benchmark<P: AsRef<Path>>(
    backend: &Arc<dyn ChemBackend>,
    training_set_file: P,
    number_samples: usize,
) -> Result<KlDivBenchmark> {
    let training_set = data::load_smiles_file(training_set_file)?;
    KlDivBenchmark::new(backend.clone(), &training_set, number_samples)
}

pub fn frechet_benchmark<P: AsRef<Path>>(
    backend: &Arc<dyn ChemBackend>,
    training_set_file: P,
    number_samples: usize,
) -> Result<FrechetBenchmark> {
    let training_set = data::load_smiles_file(training_set_file)?;
    FrechetBenchmark::new(backend.clone(), &training_set, number_samples)
}
