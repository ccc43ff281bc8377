//! The distribution plan.

use std::fs::File;
use std::path::Path;

use csv::{Writer, WriterBuilder};

use crate::error::Result;
use crate::types::DistributionRecord;

/// Writer for the distribution plan consumed by the downstream transfer
/// tool: one `address,amount` row per recipient, in completion order.
pub struct DistributionFile {
    writer: Writer<File>,
}

impl DistributionFile {
    /// Creates (truncating) the distribution file and writes its header.
    pub fn create(path: &Path) -> Result<Self> {
        // The single-column header makes the rows ragged; see SecretsFile.
        let writer = WriterBuilder::new()
            .flexible(true)
            .from_writer(File::create(path)?);
        let mut file = Self { writer };
        file.writer.write_record(["# Test Distributions"])?;
        file.writer.flush()?;
        Ok(file)
    }

    /// Appends one recipient row.
    pub fn write_recipient(&mut self, record: &DistributionRecord) -> Result<()> {
        let address = record.account.address.to_string();
        let amount = record.amount.to_string();
        self.writer
            .write_record([address.as_str(), amount.as_str()])?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Keypair;
    use crate::types::{AccountRecord, Address};

    fn record(num: u64, amount: f64) -> DistributionRecord {
        DistributionRecord {
            account: AccountRecord {
                address: Address::new(0, 0, num),
                keys: vec![Keypair::generate()],
                threshold: 1,
                initial_balance: 0,
            },
            amount,
        }
    }

    #[test]
    fn rows_follow_the_header_in_write_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("distribution.csv");

        let mut file = DistributionFile::create(&path).unwrap();
        file.write_recipient(&record(1005, 1.25)).unwrap();
        file.write_recipient(&record(1006, 2.0)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, ["# Test Distributions", "0.0.1005,1.25", "0.0.1006,2"]);
    }
}
