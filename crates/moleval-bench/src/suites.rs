//! Versioned benchmark suites.
//!
//! A suite is an ordered, fixed list of benchmarks identified by a version
//! string. Published scores are only comparable within a version, so the
//! tables here are append-only: new compositions get a new version.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use moleval_chem::{ChemBackend, FingerprintKind};
use moleval_common::{MolevalError, Result};

use crate::distribution::{
    DistributionLearningBenchmark, UniquenessBenchmark, ValidityBenchmark,
};
use crate::goal_directed::GoalDirectedBenchmark;
use crate::scoring::MeanKind;
use crate::standard_benchmarks as std_benchmarks;

const CELECOXIB: &str = "CC1=CC=C(C=C1)C1=CC(=NN1C1=CC=C(C=C1)S(N)(=O)=O)C(F)(F)F";
const TROGLITAZONE: &str = "Cc1c(C)c2OC(C)(COc3ccc(CC4SC(=O)NC4=O)cc3)CCc2c(C)c1O";
const THIOTHIXENE: &str = "CN(C)S(=O)(=O)c1ccc2Sc3ccccc3C(=CCCN4CCN(C)CC4)c2c1";
const ARIPIPRAZOLE: &str = "Clc4cccc(N3CCN(CCCCOc2ccc1c(NC(=O)CC1)c2)CC3)c4Cl";
const ALBUTEROL: &str = "CC(C)(C)NCC(O)c1ccc(O)c(CO)c1";
const MESTRANOL: &str = "COc1ccc2[C@H]3CC[C@@]4(C)[C@@H](CC[C@@]4(O)C#C)[C@@H]3CCc2c1";

/// Versions of the goal-directed suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteVersion {
    V1,
    V2,
    Trivial,
}

impl FromStr for SuiteVersion {
    type Err = MolevalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "v1" => Ok(Self::V1),
            "v2" => Ok(Self::V2),
            "trivial" => Ok(Self::Trivial),
            other => Err(MolevalError::unknown_suite("Goal-directed", other)),
        }
    }
}

/// Versions of the distribution-learning suite. v1 and v2 share the same
/// composition; both names are accepted so report headers stay faithful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionSuiteVersion {
    V1,
    V2,
}

impl FromStr for DistributionSuiteVersion {
    type Err = MolevalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "v1" => Ok(Self::V1),
            "v2" => Ok(Self::V2),
            other => Err(MolevalError::unknown_suite("Distribution-learning", other)),
        }
    }
}

pub fn goal_directed_benchmark_suite(
    version: SuiteVersion,
    backend: &Arc<dyn ChemBackend>,
) -> Result<Vec<GoalDirectedBenchmark>> {
    match version {
        SuiteVersion::V1 => goal_directed_suite_v1(backend),
        SuiteVersion::V2 => goal_directed_suite_v2(backend),
        SuiteVersion::Trivial => goal_directed_suite_trivial(backend),
    }
}

fn goal_directed_suite_v1(backend: &Arc<dyn ChemBackend>) -> Result<Vec<GoalDirectedBenchmark>> {
    let max_logp = 6.35584;
    Ok(vec![
        std_benchmarks::isomers_c11h24(backend, MeanKind::Arithmetic)?,
        std_benchmarks::isomers_c7h8n2o2(backend, MeanKind::Arithmetic)?,
        std_benchmarks::isomers_c9h10n2o2pf2cl(backend, MeanKind::Arithmetic, 100)?,
        std_benchmarks::hard_cobimetinib(backend, max_logp)?,
        std_benchmarks::hard_osimertinib(backend, MeanKind::Arithmetic)?,
        std_benchmarks::hard_fexofenadine(backend, MeanKind::Arithmetic)?,
        std_benchmarks::weird_physchem(backend),
        std_benchmarks::start_pop_ranolazine(backend)?,
        std_benchmarks::similarity(backend, CELECOXIB, "Celecoxib", FingerprintKind::Ecfp4, 1.0, true)?,
        std_benchmarks::similarity(backend, TROGLITAZONE, "Troglitazone", FingerprintKind::Ecfp4, 1.0, true)?,
        std_benchmarks::similarity(backend, THIOTHIXENE, "Thiothixene", FingerprintKind::Ecfp4, 1.0, true)?,
        std_benchmarks::similarity(backend, ARIPIPRAZOLE, "Aripiprazole", FingerprintKind::Fcfp4, 0.75, false)?,
        std_benchmarks::similarity(backend, ALBUTEROL, "Albuterol", FingerprintKind::Fcfp4, 0.75, false)?,
        std_benchmarks::similarity(backend, MESTRANOL, "Mestranol", FingerprintKind::AtomPair, 0.75, false)?,
        std_benchmarks::logp_benchmark(backend, -1.0),
        std_benchmarks::logp_benchmark(backend, 8.0),
        std_benchmarks::tpsa_benchmark(backend, 150.0),
        std_benchmarks::cns_mpo(backend, max_logp),
        std_benchmarks::qed_benchmark(backend),
        std_benchmarks::median_camphor_menthol(backend, MeanKind::Arithmetic)?,
    ])
}

fn goal_directed_suite_v2(backend: &Arc<dyn ChemBackend>) -> Result<Vec<GoalDirectedBenchmark>> {
    Ok(vec![
        std_benchmarks::similarity(backend, CELECOXIB, "Celecoxib", FingerprintKind::Ecfp4, 1.0, true)?,
        std_benchmarks::similarity(backend, TROGLITAZONE, "Troglitazone", FingerprintKind::Ecfp4, 1.0, true)?,
        std_benchmarks::similarity(backend, THIOTHIXENE, "Thiothixene", FingerprintKind::Ecfp4, 1.0, true)?,
        std_benchmarks::similarity(backend, ARIPIPRAZOLE, "Aripiprazole", FingerprintKind::Ecfp4, 0.75, false)?,
        std_benchmarks::similarity(backend, ALBUTEROL, "Albuterol", FingerprintKind::Fcfp4, 0.75, false)?,
        std_benchmarks::similarity(backend, MESTRANOL, "Mestranol", FingerprintKind::AtomPair, 0.75, false)?,
        std_benchmarks::isomers_c11h24(backend, MeanKind::Geometric)?,
        std_benchmarks::isomers_c9h10n2o2pf2cl(backend, MeanKind::Geometric, 250)?,
        std_benchmarks::median_camphor_menthol(backend, MeanKind::Geometric)?,
        std_benchmarks::median_tadalafil_sildenafil(backend, MeanKind::Geometric)?,
        std_benchmarks::hard_osimertinib(backend, MeanKind::Geometric)?,
        std_benchmarks::hard_fexofenadine(backend, MeanKind::Geometric)?,
        std_benchmarks::ranolazine_mpo(backend)?,
        std_benchmarks::perindopril_rings(backend)?,
        std_benchmarks::amlodipine_rings(backend)?,
        std_benchmarks::sitagliptin_replacement(backend)?,
        std_benchmarks::zaleplon_with_other_formula(backend)?,
        std_benchmarks::valsartan_smarts(backend),
        std_benchmarks::decoration_hop(backend)?,
        std_benchmarks::scaffold_hop(backend)?,
    ])
}

fn goal_directed_suite_trivial(backend: &Arc<dyn ChemBackend>) -> Result<Vec<GoalDirectedBenchmark>> {
    Ok(vec![
        std_benchmarks::logp_benchmark(backend, -1.0),
        std_benchmarks::logp_benchmark(backend, 8.0),
        std_benchmarks::tpsa_benchmark(backend, 150.0),
        std_benchmarks::cns_mpo(backend, 5.0),
        std_benchmarks::qed_benchmark(backend),
        std_benchmarks::isomers_c7h8n2o2(backend, MeanKind::Geometric)?,
        std_benchmarks::pioglitazone_mpo(backend)?,
    ])
}

/// Build the distribution-learning suite. v1 and v2 are identical.
pub fn distribution_learning_benchmark_suite<P: AsRef<Path>>(
    _version: DistributionSuiteVersion,
    reference_file: P,
    number_samples: usize,
    backend: &Arc<dyn ChemBackend>,
) -> Result<Vec<Box<dyn DistributionLearningBenchmark>>> {
    let reference_file = reference_file.as_ref();
    Ok(vec![
        Box::new(ValidityBenchmark::new(backend.clone(), number_samples)),
        Box::new(UniquenessBenchmark::new(backend.clone(), number_samples)),
        Box::new(std_benchmarks::novelty_benchmark(backend, reference_file, number_samples)?),
        Box::new(std_benchmarks::kldiv_benchmark(backend, reference_file, number_samples)?),
        Box::new(std_benchmarks::frechet_benchmark(backend, reference_file, number_samples)?),
    ])
}
