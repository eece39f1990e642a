use mockall_double::double;
use mongodb::{
    bson::{doc, Document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
};
use std::sync::Arc;

use crate::constants::*;

#[double]
use crate::database::AppDatabase;

/// Generates the next val for a given sequence id
pub async fn get_seq_nxt_val(seq_id: &str, db: &Arc<AppDatabase>) -> anyhow::Result<u32> {
    let filter = doc! {"_id": seq_id};
    let update = doc! {"$inc": {"val": 1}};
    let mut options = FindOneAndUpdateOptions::default();
    options.upsert = Some(true);
    options.return_document = Some(ReturnDocument::After);
    let result = db
        .find_one_and_update::<Document>(DB_NAME, COLL_SEQUENCES, filter, update, Some(options))
        .await?
        .ok_or(anyhow::anyhow!("sequence {seq_id} returned no document"))?;
    let val = result.get_i32("val")?;
    // the $inc starts at 1 on upsert, anything else means a corrupt counter
    if val <= 0 {
        return Err(anyhow::anyhow!(
            "corrupt value {val} in sequence {seq_id}"
        ));
    }
    Ok(val as u32)
}
