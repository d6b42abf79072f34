pub mod d400_fmcg_trends;
