pub mod u501_import_fmcg_csv;
