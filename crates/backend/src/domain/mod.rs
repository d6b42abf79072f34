pub mod a001_fmcg_record;
