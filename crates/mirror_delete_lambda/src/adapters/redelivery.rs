pub trait RedeliveryScheduler {
    fn schedule_redelivery(&self, receipt_handle: &str, delay_seconds: u32) -> Result<(), String>;
}
