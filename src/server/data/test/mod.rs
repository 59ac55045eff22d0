mod panel_server;
