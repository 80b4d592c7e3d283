pub mod sonar_transport;
