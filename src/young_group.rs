use itertools::Itertools;
use log::debug;
use num::{BigUint, One};
use permutations::Permutation;

use crate::{
    group::GeneratedGroup,
    partition::Partition,
    perm::{GroupError, Perm},
    utils::factorial,
    young::YoungTableau,
};

/*
which families of generators go in besides the rows
the default has everything and so gives the full symmetric group
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YoungGroupConfig {
    pub include_fused_rows: bool,
    pub include_cols: bool,
}

impl YoungGroupConfig {
    pub fn rows_only() -> Self {
        Self {
            include_fused_rows: false,
            include_cols: false,
        }
    }

    pub fn fused_rows() -> Self {
        Self {
            include_fused_rows: true,
            include_cols: false,
        }
    }

    pub fn full() -> Self {
        Self {
            include_fused_rows: true,
            include_cols: true,
        }
    }
}

impl Default for YoungGroupConfig {
    fn default() -> Self {
        Self::full()
    }
}

/*
tableau entries start at the base index, the permuted points start at 0
*/
fn to_points(yt: &YoungTableau, cells: &[usize]) -> Vec<usize> {
    let base = yt.base_index();
    cells.iter().map(|z| z - base).collect_vec()
}

fn to_perm(p: &Permutation, degree: usize) -> Perm {
    match Perm::from_permutation(p, degree) {
        Ok(perm) => perm,
        Err(e) => unreachable!("transposition products are permutations: {}", e),
    }
}

/*
adjacent transpositions (c0 c1), (c1 c2), ... which generate Sym(cells)
*/
fn symmetric_generators_on(degree: usize, points: &[usize]) -> Vec<Perm> {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| to_perm(&Permutation::transposition(degree, *a, *b), degree))
        .collect_vec()
}

pub fn row_generators(yt: &YoungTableau) -> Vec<Perm> {
    let degree = yt.size();
    yt.rows()
        .iter()
        .flat_map(|row| symmetric_generators_on(degree, &to_points(yt, row)))
        .collect_vec()
}

/*
for rows i < j of the same length the product of the transpositions
swapping their k'th entries for every k
*/
pub fn fused_row_generators(yt: &YoungTableau) -> Vec<Perm> {
    let degree = yt.size();
    let rows = yt.rows();
    let mut answer = vec![];
    for (row_i, row_j) in rows.iter().tuple_combinations() {
        if row_i.len() != row_j.len() {
            continue;
        }
        let swap = to_points(yt, row_i)
            .into_iter()
            .zip(to_points(yt, row_j))
            .fold(Permutation::identity(degree), |acc, (a, b)| {
                acc * Permutation::transposition(degree, a, b)
            });
        answer.push(to_perm(&swap, degree));
    }
    answer
}

pub fn column_generators(yt: &YoungTableau) -> Vec<Perm> {
    let degree = yt.size();
    yt.columns()
        .iter()
        .flat_map(|col| symmetric_generators_on(degree, &to_points(yt, col)))
        .collect_vec()
}

pub fn build_generators(
    yt: &YoungTableau,
    include_fused_rows: bool,
    include_cols: bool,
) -> Vec<Perm> {
    let mut generators = row_generators(yt);
    if include_fused_rows {
        generators.extend(fused_row_generators(yt));
    }
    if include_cols {
        generators.extend(column_generators(yt));
    }
    debug!(
        "{} with fused rows {} and columns {} has {} generators",
        yt,
        include_fused_rows,
        include_cols,
        generators.len()
    );
    generators
}

pub fn young_group(
    yt: &YoungTableau,
    config: YoungGroupConfig,
) -> Result<GeneratedGroup, GroupError> {
    let generators = build_generators(yt, config.include_fused_rows, config.include_cols);
    GeneratedGroup::new(yt.size(), generators)
}

/*
|rows only| = prod p_i!
|fused rows| = prod p_i! * prod q_j! with q_j the number of rows of length j
|with columns| = N!
*/
pub fn expected_order(partition: &Partition, config: YoungGroupConfig) -> BigUint {
    if config.include_cols {
        return factorial(partition.total());
    }
    let rows_part = partition
        .parts()
        .iter()
        .fold(BigUint::one(), |acc, p| acc * factorial(*p));
    if config.include_fused_rows {
        partition
            .multiplicities()
            .iter()
            .fold(rows_part, |acc, (_, count)| acc * factorial(*count))
    } else {
        rows_part
    }
}

mod test {

    #[test]
    fn fused_rows_two_two() {
        use super::fused_row_generators;
        use crate::perm::Perm;
        use crate::young::YoungTableau;
        let yt = YoungTableau::from_notation("2 + 2", false).unwrap();
        let gens = fused_row_generators(&yt);
        let expected =
            &Perm::from_cycle(4, &[0, 2]).unwrap() * &Perm::from_cycle(4, &[1, 3]).unwrap();
        assert_eq!(gens, vec![expected]);
        assert_eq!(gens[0].to_string(), "(0 2)(1 3)");
        let yt0 = YoungTableau::from_notation("2 + 2", true).unwrap();
        assert_eq!(fused_row_generators(&yt0), gens);
    }

    #[test]
    fn fused_rows_only_equal_lengths() {
        use super::fused_row_generators;
        use crate::young::YoungTableau;
        let yt = YoungTableau::from_notation("3 + 2 + 2 + 2 + 1", false).unwrap();
        let gens = fused_row_generators(&yt);
        assert_eq!(gens.len(), 3);
        for gen in &gens {
            assert_eq!(gen.cycles().len(), 2);
            assert_eq!(gen.order(), 2);
        }
        let distinct = YoungTableau::from_notation("4 + 3 + 1", false).unwrap();
        assert!(fused_row_generators(&distinct).is_empty());
    }

    #[test]
    fn row_and_column_generators() {
        use super::{column_generators, row_generators};
        use crate::young::YoungTableau;
        let yt = YoungTableau::from_notation("3 + 1", false).unwrap();
        let rows = row_generators(&yt)
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<_>>();
        assert_eq!(rows, vec!["(0 1)", "(1 2)"]);
        let cols = column_generators(&yt)
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<_>>();
        assert_eq!(cols, vec!["(0 3)"]);
    }

    #[test]
    fn two_two_orders() {
        use super::{young_group, YoungGroupConfig};
        use crate::group::PermutationGroup;
        use crate::young::YoungTableau;
        let yt = YoungTableau::from_notation("2 + 2", false).unwrap();
        let rows_only = young_group(&yt, YoungGroupConfig::rows_only()).unwrap();
        assert_eq!(rows_only.order(), 4);
        let fused = young_group(&yt, YoungGroupConfig::fused_rows()).unwrap();
        assert_eq!(fused.order(), 8);
        let full = young_group(&yt, YoungGroupConfig::default()).unwrap();
        assert_eq!(full.order(), 24);
    }

    #[test]
    fn orders_match_closed_form() {
        use super::{expected_order, young_group, YoungGroupConfig};
        use crate::group::PermutationGroup;
        use crate::partition::generate_partitions;
        use crate::young::YoungTableau;
        use num::BigUint;
        let configs = [
            YoungGroupConfig::rows_only(),
            YoungGroupConfig::fused_rows(),
            YoungGroupConfig {
                include_fused_rows: false,
                include_cols: true,
            },
            YoungGroupConfig::full(),
        ];
        for n in 0..=5 {
            for p in generate_partitions(n) {
                let yt = YoungTableau::from(p.clone());
                for config in configs {
                    let group = young_group(&yt, config).unwrap();
                    assert_eq!(
                        BigUint::from(group.order()),
                        expected_order(&p, config),
                        "{} under {:?}",
                        yt,
                        config
                    );
                }
            }
        }
    }

    #[test]
    fn row_orbits() {
        use super::{young_group, YoungGroupConfig};
        use crate::young::YoungTableau;
        let yt = YoungTableau::from_notation("3 + 2 + 2", true).unwrap();
        let rows_only = young_group(&yt, YoungGroupConfig::rows_only()).unwrap();
        assert_eq!(rows_only.orbits(), yt.rows());
        let fused = young_group(&yt, YoungGroupConfig::fused_rows()).unwrap();
        assert_eq!(fused.orbits(), vec![vec![0, 1, 2], vec![3, 4, 5, 6]]);
        let full = young_group(&yt, YoungGroupConfig::full()).unwrap();
        assert!(full.is_transitive());
    }
}
