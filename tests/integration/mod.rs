mod helpers;
mod test_release;
mod test_sync;
