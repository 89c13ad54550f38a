pub mod dex_screener;
