pub mod predict_server;
