pub mod daily_record;
