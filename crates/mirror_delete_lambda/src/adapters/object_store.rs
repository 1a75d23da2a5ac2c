use crate::runtime::contract::DeleteReceipt;

pub trait ObjectRemover {
    fn delete_object(&self, key: &str) -> Result<DeleteReceipt, String>;
}
