use std::{error, fmt, str::FromStr};

use itertools::Itertools;

use crate::utils::is_non_increasing;

const PART_SEPARATOR: &str = " + ";

type Part = usize;

/*
an integer partition p_1 >= p_2 >= ... >= p_k > 0 of N = sum p_i
the empty partition is the unique partition of 0
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Partition {
    parts: Vec<Part>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartitionError {
    InvalidFormat(String),
    NotPartition(Vec<Part>),
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(text) => write!(f, "Invalid partition notation: {}", text),
            Self::NotPartition(parts) => write!(
                f,
                "Parts {:?} must be positive, non-increasing and have a representable total",
                parts
            ),
        }
    }
}
impl error::Error for PartitionError {}

fn parse_part(token: &str) -> Option<Part> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) || token.starts_with('0')
    {
        return None;
    }
    token.parse::<Part>().ok()
}

/*
one more than the total has to fit, the one-indexed values run up to the total
*/
fn total_fits(parts: &[Part]) -> bool {
    parts
        .iter()
        .try_fold(1 as Part, |acc, p| acc.checked_add(*p))
        .is_some()
}

fn parse_parts(text: &str) -> Option<Vec<Part>> {
    let parts = text
        .split(PART_SEPARATOR)
        .map(parse_part)
        .collect::<Option<Vec<Part>>>()?;
    if is_non_increasing(parts.iter(), None) && total_fits(&parts) {
        Some(parts)
    } else {
        None
    }
}

/*
the notation is "a1 + a2 + ... + an" with the ai positive decimal integers
without leading zeros, numerically non-increasing
spacing is exactly the canonical one, so that parsing then printing gives back the same text
*/
pub fn is_valid_partition(text: &str) -> bool {
    parse_parts(text).is_some()
}

impl Partition {
    pub fn new(parts: Vec<Part>) -> Result<Self, PartitionError> {
        if parts.iter().all(|p| *p > 0)
            && is_non_increasing(parts.iter(), None)
            && total_fits(&parts)
        {
            Ok(Self { parts })
        } else {
            Err(PartitionError::NotPartition(parts))
        }
    }

    pub fn empty() -> Self {
        Self { parts: vec![] }
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.parts.iter().sum()
    }

    /*
    the integers 1..=N (or 0..N) cut into consecutive blocks
    whose sizes are the parts in order
    */
    pub fn values(&self, zero_indexed: bool) -> Vec<Vec<usize>> {
        let mut next_value = usize::from(!zero_indexed);
        let mut equiv_classes = Vec::with_capacity(self.parts.len());
        for part in &self.parts {
            equiv_classes.push((next_value..next_value + part).collect_vec());
            next_value += part;
        }
        equiv_classes
    }

    /*
    the column lengths of the Young diagram
    */
    pub fn conjugate(&self) -> Self {
        let longest = self.parts.first().copied().unwrap_or(0);
        let parts = (0..longest)
            .map(|col_idx| self.parts.iter().filter(|p| **p > col_idx).count())
            .collect_vec();
        Self { parts }
    }

    /*
    (row length, how many rows have that length) in order of decreasing length
    */
    pub fn multiplicities(&self) -> Vec<(Part, usize)> {
        self.parts
            .iter()
            .dedup_with_count()
            .map(|(count, part)| (*part, count))
            .collect_vec()
    }
}

impl FromStr for Partition {
    type Err = PartitionError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_parts(text)
            .map(|parts| Self { parts })
            .ok_or_else(|| PartitionError::InvalidFormat(text.to_string()))
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.iter().join(PART_SEPARATOR))
    }
}

impl TryFrom<Vec<Part>> for Partition {
    type Error = PartitionError;

    fn try_from(parts: Vec<Part>) -> Result<Self, Self::Error> {
        Self::new(parts)
    }
}

/*
all partitions of target, each exactly once
every partition of n-1 gives p + [1], and also p with its last part incremented
when that keeps it non-increasing
this is that recursion unrolled into a depth first traversal with an explicit stack
so nothing beyond the current branch is ever materialized
clone before iterating to be able to restart
*/
#[derive(Clone, Debug)]
pub struct Partitions {
    target: usize,
    stack: Vec<(Vec<Part>, usize)>,
}

pub fn generate_partitions(n: usize) -> Partitions {
    Partitions {
        target: n,
        stack: vec![(vec![], 0)],
    }
}

impl Iterator for Partitions {
    type Item = Partition;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((parts, sum)) = self.stack.pop() {
            if sum == self.target {
                return Some(Partition { parts });
            }
            let len = parts.len();
            let can_increment = len > 0 && (len < 2 || parts[len - 2] > parts[len - 1]);
            if can_increment {
                let mut incremented = parts.clone();
                incremented[len - 1] += 1;
                self.stack.push((incremented, sum + 1));
            }
            let mut appended = parts;
            appended.push(1);
            self.stack.push((appended, sum + 1));
        }
        None
    }
}

mod test {

    #[test]
    fn valid_notation() {
        use super::is_valid_partition;
        assert!(is_valid_partition("5 + 4 + 3 + 2 + 1"));
        assert!(is_valid_partition("7"));
        assert!(is_valid_partition("2 + 2 + 2"));
        assert!(is_valid_partition("10 + 9"));
        assert!(!is_valid_partition("5 + 4 + 3 + 2 + 3"));
        assert!(!is_valid_partition("5 + 4 + 3 + 2 + 1 + a"));
        assert!(!is_valid_partition("5 + 4 * 3 + 2 - 1"));
        assert!(!is_valid_partition("5 + 4 + 3 + 2 +"));
        assert!(!is_valid_partition(""));
        assert!(!is_valid_partition("3 + 0"));
        assert!(!is_valid_partition("03 + 1"));
        assert!(!is_valid_partition(" 3 + 1"));
        assert!(!is_valid_partition("3+1"));
        assert!(!is_valid_partition("-3 + 1"));
        assert!(!is_valid_partition("99999999999999999999999 + 1"));
        assert!(!is_valid_partition(
            "10000000000000000000 + 10000000000000000000"
        ));
        assert!("10000000000000000000 + 10000000000000000000"
            .parse::<super::Partition>()
            .is_err());
    }

    #[test]
    fn from_and_to_str() {
        use super::{Partition, PartitionError};
        use std::str::FromStr;
        let p = Partition::from_str("5 + 4 + 3 + 2 + 1");
        assert_eq!(p, Partition::new(vec![5, 4, 3, 2, 1]));
        let bad = "5 + 4 + 3 + 2 +".parse::<Partition>();
        assert_eq!(
            bad,
            Err(PartitionError::InvalidFormat("5 + 4 + 3 + 2 +".to_string()))
        );
        for text in ["5 + 4 + 3 + 2 + 1", "1", "3 + 3 + 1 + 1", "12 + 2"] {
            let p: Partition = text.parse().unwrap();
            assert_eq!(p.to_string(), text);
        }
    }

    #[test]
    fn round_trip_random() {
        use super::{is_valid_partition, Partition};
        use itertools::Itertools;
        use rand::Rng;
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let num_parts = rng.gen_range(1..8);
            let mut parts = (0..num_parts)
                .map(|_| rng.gen_range(1..20usize))
                .collect_vec();
            parts.sort_by(|a, b| b.cmp(a));
            let text = parts.iter().join(" + ");
            assert!(is_valid_partition(&text), "on {}", text);
            let p: Partition = text.parse().unwrap();
            assert_eq!(p.parts(), &parts[..]);
            assert_eq!(p.to_string(), text);
        }
    }

    #[test]
    fn not_a_partition() {
        use super::{Partition, PartitionError};
        assert_eq!(
            Partition::new(vec![1, 2]),
            Err(PartitionError::NotPartition(vec![1, 2]))
        );
        assert_eq!(
            Partition::try_from(vec![3, 0]),
            Err(PartitionError::NotPartition(vec![3, 0]))
        );
        assert!(Partition::new(vec![]).is_ok());
        let too_big = vec![usize::MAX / 2 + 1, usize::MAX / 2 + 1];
        assert_eq!(
            Partition::new(too_big.clone()),
            Err(PartitionError::NotPartition(too_big))
        );
        assert_eq!(Partition::new(vec![usize::MAX]).map(|p| p.len()).ok(), None);
        let fits = Partition::new(vec![usize::MAX / 2, usize::MAX / 2]).unwrap();
        assert_eq!(fits.total(), usize::MAX - 1);
    }

    #[test]
    fn values() {
        use super::Partition;
        let p: Partition = "5 + 3 + 1".parse().unwrap();
        assert_eq!(
            p.values(false),
            vec![vec![1, 2, 3, 4, 5], vec![6, 7, 8], vec![9]]
        );
        assert_eq!(
            p.values(true),
            vec![vec![0, 1, 2, 3, 4], vec![5, 6, 7], vec![8]]
        );
        assert!(Partition::empty().values(false).is_empty());
        assert_eq!(p.total(), 9);
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn conjugate_and_multiplicities() {
        use super::Partition;
        let p: Partition = "5 + 3 + 1".parse().unwrap();
        assert_eq!(p.conjugate().parts(), &[3, 2, 2, 1, 1]);
        assert_eq!(p.conjugate().conjugate(), p);
        let q: Partition = "3 + 3 + 2 + 1 + 1 + 1".parse().unwrap();
        assert_eq!(q.multiplicities(), vec![(3, 2), (2, 1), (1, 3)]);
        assert!(Partition::empty().conjugate().is_empty());
    }

    #[test]
    fn generate_five() {
        use super::generate_partitions;
        use itertools::Itertools;
        let parts = generate_partitions(5)
            .map(|p| p.parts().to_vec())
            .collect_vec();
        assert_eq!(
            parts,
            vec![
                vec![1, 1, 1, 1, 1],
                vec![2, 1, 1, 1],
                vec![2, 2, 1],
                vec![3, 1, 1],
                vec![3, 2],
                vec![4, 1],
                vec![5],
            ]
        );
    }

    #[test]
    fn generate_counts() {
        use super::{generate_partitions, Partition};
        use crate::utils::is_non_increasing;
        use std::collections::HashSet;
        let expected_counts = [1, 1, 2, 3, 5, 7, 11, 15, 22, 30, 42, 56, 77];
        for (n, expected) in expected_counts.iter().enumerate() {
            let mut seen: HashSet<Partition> = HashSet::new();
            for p in generate_partitions(n) {
                assert_eq!(p.total(), n);
                assert!(p.parts().iter().all(|z| *z > 0));
                assert!(is_non_increasing(p.parts().iter(), None));
                assert!(seen.insert(p.clone()), "{:?} seen twice", p);
            }
            assert_eq!(seen.len(), *expected, "on n = {}", n);
        }
        let zero = generate_partitions(0).collect::<Vec<_>>();
        assert_eq!(zero, vec![Partition::empty()]);
    }

    #[test]
    fn generate_restartable() {
        use super::generate_partitions;
        let fresh = generate_partitions(6);
        let mut partway = fresh.clone();
        let first = partway.next();
        let _ = partway.next();
        assert_eq!(fresh.clone().next(), first);
        assert_eq!(fresh.clone().count(), 11);
        assert_eq!(partway.count(), 9);
    }
}
