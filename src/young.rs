use std::fmt;

use crate::partition::{Partition, PartitionError};

/*
the integers 1..=N (or 0..N) written row by row into the Young diagram of a partition
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YoungTableau {
    partition: Partition,
    zero_indexed: bool,
}

impl YoungTableau {
    pub fn new(partition: Partition, zero_indexed: bool) -> Self {
        Self {
            partition,
            zero_indexed,
        }
    }

    pub fn from_notation(text: &str, zero_indexed: bool) -> Result<Self, PartitionError> {
        Ok(Self::new(text.parse()?, zero_indexed))
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn size(&self) -> usize {
        self.partition.total()
    }

    pub fn base_index(&self) -> usize {
        usize::from(!self.zero_indexed)
    }

    pub fn rows(&self) -> Vec<Vec<usize>> {
        self.partition.values(self.zero_indexed)
    }

    /*
    ragged, column i only has entries from the rows which are longer than i
    */
    pub fn columns(&self) -> Vec<Vec<usize>> {
        let rows = self.rows();
        let num_cols = rows.first().map_or(0, |row| row.len());
        (0..num_cols)
            .map(|col_idx| {
                rows.iter()
                    .filter_map(|row| row.get(col_idx).copied())
                    .collect()
            })
            .collect()
    }
}

impl From<Partition> for YoungTableau {
    fn from(partition: Partition) -> Self {
        Self::new(partition, false)
    }
}

impl fmt::Display for YoungTableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "YT({})", self.partition)
    }
}

mod test {

    #[test]
    fn create_and_display() {
        use super::YoungTableau;
        let yt = YoungTableau::from_notation("5 + 3 + 1", false).unwrap();
        assert_eq!(yt.to_string(), "YT(5 + 3 + 1)");
        assert_eq!(yt.size(), 9);
        assert!(YoungTableau::from_notation("1 + 3", false).is_err());
    }

    #[test]
    fn rows() {
        use super::YoungTableau;
        let yt = YoungTableau::from_notation("5 + 3 + 1", false).unwrap();
        assert_eq!(
            yt.rows(),
            vec![vec![1, 2, 3, 4, 5], vec![6, 7, 8], vec![9]]
        );
        let yt0 = YoungTableau::from_notation("5 + 3 + 1", true).unwrap();
        assert_eq!(
            yt0.rows(),
            vec![vec![0, 1, 2, 3, 4], vec![5, 6, 7], vec![8]]
        );
        assert_eq!(yt.base_index(), 1);
        assert_eq!(yt0.base_index(), 0);
    }

    #[test]
    fn columns() {
        use super::YoungTableau;
        let yt = YoungTableau::from_notation("5 + 3 + 1", false).unwrap();
        assert_eq!(
            yt.columns(),
            vec![vec![1, 6, 9], vec![2, 7], vec![3, 8], vec![4], vec![5]]
        );
        let square = YoungTableau::from_notation("2 + 2", true).unwrap();
        assert_eq!(square.columns(), vec![vec![0, 2], vec![1, 3]]);
    }

    #[test]
    fn columns_match_conjugate() {
        use super::YoungTableau;
        use crate::partition::generate_partitions;
        for p in generate_partitions(7) {
            let col_lengths = YoungTableau::from(p.clone())
                .columns()
                .iter()
                .map(|c| c.len())
                .collect::<Vec<_>>();
            assert_eq!(col_lengths, p.conjugate().parts());
        }
    }

    #[test]
    fn empty_tableau() {
        use super::YoungTableau;
        use crate::partition::Partition;
        let yt = YoungTableau::from(Partition::empty());
        assert!(yt.rows().is_empty());
        assert!(yt.columns().is_empty());
        assert_eq!(yt.to_string(), "YT()");
    }
}
