pub mod a001_fmcg_record;
pub mod d400_fmcg_trends;
pub mod u501_import_fmcg_csv;
