pub mod live_feed_use_case;
