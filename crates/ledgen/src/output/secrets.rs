//! The secrets ledger.

use std::fs::File;
use std::path::Path;

use csv::{Writer, WriterBuilder};

use crate::error::Result;
use crate::types::{AccountRecord, TokenRecord};

/// Writer for the secrets ledger.
///
/// The file opens with the token metadata block, a column header, and the
/// treasury and payer accounts; recipient rows are appended as they complete.
/// An account with multiple keys emits one continuation row per extra
/// keypair, carrying only the key columns.
pub struct SecretsFile {
    writer: Writer<File>,
}

impl SecretsFile {
    /// Creates (truncating) the secrets file and writes its header block.
    pub fn create(
        path: &Path,
        token: &TokenRecord,
        treasury: &AccountRecord,
        distribution_payer: &AccountRecord,
        scheduling_payer: &AccountRecord,
    ) -> Result<Self> {
        // Rows vary in width (metadata pairs, the blank separator, six-column
        // account rows), so the writer must not enforce a uniform length.
        let writer = WriterBuilder::new()
            .flexible(true)
            .from_writer(File::create(path)?);
        let mut file = Self { writer };
        file.write_header(token, treasury, distribution_payer, scheduling_payer)?;
        Ok(file)
    }

    /// Appends one recipient's account details.
    pub fn write_recipient(&mut self, account: &AccountRecord) -> Result<()> {
        self.write_account("Recipient", account)
    }

    fn write_header(
        &mut self,
        token: &TokenRecord,
        treasury: &AccountRecord,
        distribution_payer: &AccountRecord,
        scheduling_payer: &AccountRecord,
    ) -> Result<()> {
        self.writer
            .write_record(["Token", token.address.to_string().as_str()])?;
        self.writer.write_record(["Symbol", token.symbol.as_str()])?;
        self.writer.write_record(["Name", token.name.as_str()])?;
        self.writer.write_record(["Memo", token.memo.as_str()])?;
        self.writer
            .write_record(["Circulation", token.circulation.to_string().as_str()])?;
        self.writer
            .write_record(["Decimals", token.decimals.to_string().as_str()])?;
        self.writer.write_record([
            "Type",
            "Account",
            "Balance",
            "Req'd. Sig",
            "Public Key",
            "Private Key",
        ])?;
        self.write_account("Treasury", treasury)?;
        self.write_account("Dist Payer", distribution_payer)?;
        self.write_account("Sched Payer", scheduling_payer)
    }

    fn write_account(&mut self, role: &str, account: &AccountRecord) -> Result<()> {
        let address = account.address.to_string();
        let balance = account.initial_balance.to_string();
        let threshold = account.threshold.to_string();
        let mut keys = account.keys.iter();
        if let Some(first) = keys.next() {
            let public = first.public_key_hex();
            let private = first.private_key_hex();
            self.writer.write_record([
                role,
                address.as_str(),
                balance.as_str(),
                threshold.as_str(),
                public.as_str(),
                private.as_str(),
            ])?;
        }
        for key in keys {
            let public = key.public_key_hex();
            let private = key.private_key_hex();
            self.writer
                .write_record(["", "", "", "", public.as_str(), private.as_str()])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
